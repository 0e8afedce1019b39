//! Color space identifiers.
//!
//! A color triple carries no runtime tag: `[50.0, 20.0, 30.0]` could be LAB,
//! XYZ or anything else. chromat keeps the space in the type instead (see
//! [`crate::pixel`]) and uses [`ColorSpaceId`] only where a space has to be
//! named at runtime: logging, configuration, error messages.
//!
//! # Supported Spaces
//!
//! | Id | Channels | Nominal range |
//! |----|----------|---------------|
//! | [`Rgb`](ColorSpaceId::Rgb) | R, G, B | [0, 255] device or [0, 1] normalized |
//! | [`Hsv`](ColorSpaceId::Hsv) | H, S, V | H in [0, 360), S/V in [0, 1] |
//! | [`Hsl`](ColorSpaceId::Hsl) | H, S, L | H in [0, 360), S/L in [0, 1] |
//! | [`Xyz`](ColorSpaceId::Xyz) | X, Y, Z | Y in [0, 100] under D65 |
//! | [`Lab`](ColorSpaceId::Lab) | L, a, b | L in [0, 100], a/b unbounded |
//! | [`Lch`](ColorSpaceId::Lch) | L, C, h | C >= 0, h in [0, 360) |
//!
//! # Usage
//!
//! ```
//! use chromat_core::ColorSpaceId;
//!
//! let id: ColorSpaceId = "lab".parse().unwrap();
//! assert_eq!(id, ColorSpaceId::Lab);
//! assert_eq!(id.channels(), ["L", "a", "b"]);
//! assert!("cmyk".parse::<ColorSpaceId>().is_err());
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// Runtime name of a supported color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpaceId {
    /// sRGB, device or normalized scale.
    Rgb,
    /// Hue, saturation, value.
    Hsv,
    /// Hue, saturation, lightness.
    Hsl,
    /// CIE 1931 XYZ tristimulus.
    Xyz,
    /// CIE 1976 L*a*b*.
    Lab,
    /// Cylindrical L*C*h of LAB.
    Lch,
}

impl ColorSpaceId {
    /// Every supported space, in pipeline order.
    pub const ALL: [ColorSpaceId; 6] = [
        Self::Rgb,
        Self::Hsv,
        Self::Hsl,
        Self::Xyz,
        Self::Lab,
        Self::Lch,
    ];

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Hsv => "hsv",
            Self::Hsl => "hsl",
            Self::Xyz => "xyz",
            Self::Lab => "lab",
            Self::Lch => "lch",
        }
    }

    /// Channel labels in storage order.
    pub const fn channels(self) -> [&'static str; 3] {
        match self {
            Self::Rgb => ["R", "G", "B"],
            Self::Hsv => ["H", "S", "V"],
            Self::Hsl => ["H", "S", "L"],
            Self::Xyz => ["X", "Y", "Z"],
            Self::Lab => ["L", "a", "b"],
            Self::Lch => ["L", "C", "h"],
        }
    }

    /// Whether the first channel is a hue angle in degrees.
    pub const fn is_hue_first(self) -> bool {
        matches!(self, Self::Hsv | Self::Hsl)
    }

    /// Whether the space is device independent (defined relative to a white point).
    pub const fn is_device_independent(self) -> bool {
        matches!(self, Self::Xyz | Self::Lab | Self::Lch)
    }

    fn options() -> String {
        Self::ALL
            .iter()
            .map(|id| id.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ColorSpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpaceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.name() == lower)
            .ok_or_else(|| Error::UnknownColorSpace {
                name: s.to_string(),
                options: Self::options(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for id in ColorSpaceId::ALL {
            let parsed: ColorSpaceId = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(" XYZ ".parse::<ColorSpaceId>().unwrap(), ColorSpaceId::Xyz);
    }

    #[test]
    fn test_unknown_lists_options() {
        let err = "ycbcr".parse::<ColorSpaceId>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ycbcr"));
        assert!(msg.contains("lab"));
        assert!(err.is_argument_error());
    }

    #[test]
    fn test_flags() {
        assert!(ColorSpaceId::Hsv.is_hue_first());
        assert!(!ColorSpaceId::Lch.is_hue_first());
        assert!(ColorSpaceId::Lab.is_device_independent());
        assert!(!ColorSpaceId::Rgb.is_device_independent());
    }
}
