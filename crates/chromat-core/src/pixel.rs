//! Typed color triples.
//!
//! Each color space has its own value type so a LAB triple can never be
//! passed where an XYZ triple is expected:
//!
//! - [`Rgb8`] - device sRGB, one byte per channel
//! - [`Rgb`] - normalized sRGB, `f64` channels in [0, 1]
//! - [`Hsv`], [`Hsl`] - hue in degrees, other channels in [0, 1]
//! - [`Xyz`] - CIE XYZ, Y = 100 for the reference white
//! - [`Lab`] - CIELAB
//! - [`Lch`] - cylindrical LAB
//!
//! All of them implement [`Pixel`], which ties the type to a
//! [`ColorSpaceId`] and converts to and from plain `[f64; 3]` arrays.
//!
//! # RGB Scale
//!
//! Raw RGB arrays are ambiguous: `[0.0, 0.0, 0.5]` is either a dark blue in
//! normalized units or almost black in byte units. [`Rgb::from_scaled`]
//! makes the caller say which one with [`RgbScale`]. [`RgbScale::Auto`]
//! keeps the "any channel above 1 means bytes" heuristic for callers that
//! need it.
//!
//! ```
//! use chromat_core::{Rgb, RgbScale};
//!
//! let unit = Rgb::from_scaled([0.0, 0.0, 0.5], RgbScale::Unit);
//! let byte = Rgb::from_scaled([0.0, 0.0, 0.5], RgbScale::Byte);
//! assert_eq!(unit.b, 0.5);
//! assert!(byte.b < 0.01);
//! ```

use crate::{ColorSpaceId, Error, Result};

/// Scale factor between byte and normalized channels.
pub const BYTE_MAX: f64 = 255.0;

/// A color value with a fixed color space.
///
/// Implementors are plain `Copy` data. The array form is always
/// `[f64; 3]` in the channel order given by [`ColorSpaceId::channels`].
pub trait Pixel: Copy + Default + Send + Sync + std::fmt::Debug + PartialEq + 'static {
    /// Color space of this type.
    const SPACE: ColorSpaceId;

    /// Returns the channels as an array.
    fn to_array(self) -> [f64; 3];

    /// Builds a value from an array of channels.
    fn from_array(arr: [f64; 3]) -> Self;

    /// Builds a value from a slice, failing unless it holds exactly three values.
    ///
    /// ```
    /// use chromat_core::{Lab, Pixel};
    ///
    /// assert!(Lab::try_from_slice(&[50.0, 0.0, 0.0]).is_ok());
    /// assert!(Lab::try_from_slice(&[50.0, 0.0]).is_err());
    /// ```
    fn try_from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [a, b, c] => Ok(Self::from_array([*a, *b, *c])),
            _ => Err(Error::arity(3, values.len())),
        }
    }
}

// ============================================================================
// RGB
// ============================================================================

/// How to interpret the magnitude of raw RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RgbScale {
    /// Channels are already in [0, 1].
    #[default]
    Unit,
    /// Channels are in [0, 255].
    Byte,
    /// Byte scale if any channel magnitude exceeds 1, unit scale otherwise.
    ///
    /// Ambiguous for dark byte colors such as `[0, 0, 1]`; prefer an
    /// explicit scale where the caller knows it.
    Auto,
}

impl RgbScale {
    /// Resolves [`RgbScale::Auto`] against concrete channel values.
    pub fn resolve(self, rgb: [f64; 3]) -> Self {
        match self {
            Self::Auto => {
                if rgb.iter().any(|c| c.abs() > 1.0) {
                    Self::Byte
                } else {
                    Self::Unit
                }
            }
            other => other,
        }
    }
}

/// Device sRGB with one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb8 {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a byte RGB value.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Rounds and clips real channel values in [0, 255] to bytes.
    #[inline]
    pub fn from_f64_clamped(rgb: [f64; 3]) -> Self {
        Self::new(clamp_byte(rgb[0]), clamp_byte(rgb[1]), clamp_byte(rgb[2]))
    }

    /// Normalizes to [0, 1].
    #[inline]
    pub fn to_unit(self) -> Rgb {
        Rgb::new(
            self.r as f64 / BYTE_MAX,
            self.g as f64 / BYTE_MAX,
            self.b as f64 / BYTE_MAX,
        )
    }

    /// Channels as bytes.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(px: Rgb8) -> Self {
        px.to_bytes()
    }
}

impl Pixel for Rgb8 {
    const SPACE: ColorSpaceId = ColorSpaceId::Rgb;

    fn to_array(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Rounds to the nearest byte and clips to [0, 255].
    fn from_array(arr: [f64; 3]) -> Self {
        Self::from_f64_clamped(arr)
    }
}

/// Rounds to the nearest integer and clips to the byte range.
#[inline]
pub fn clamp_byte(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, BYTE_MAX) as u8
}

/// Normalized, gamma-encoded sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red in [0, 1]
    pub r: f64,
    /// Green in [0, 1]
    pub g: f64,
    /// Blue in [0, 1]
    pub b: f64,
}

impl Rgb {
    /// Creates a normalized RGB value.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Builds from raw channels in the given scale.
    pub fn from_scaled(rgb: [f64; 3], scale: RgbScale) -> Self {
        match scale.resolve(rgb) {
            RgbScale::Byte => Self::new(rgb[0] / BYTE_MAX, rgb[1] / BYTE_MAX, rgb[2] / BYTE_MAX),
            _ => Self::new(rgb[0], rgb[1], rgb[2]),
        }
    }

    /// Scales to bytes, rounding and clipping.
    #[inline]
    pub fn to_rgb8(self) -> Rgb8 {
        Rgb8::from_f64_clamped([self.r * BYTE_MAX, self.g * BYTE_MAX, self.b * BYTE_MAX])
    }

    /// Largest channel.
    #[inline]
    pub fn max_channel(self) -> f64 {
        self.r.max(self.g).max(self.b)
    }

    /// Smallest channel.
    #[inline]
    pub fn min_channel(self) -> f64 {
        self.r.min(self.g).min(self.b)
    }
}

impl From<Rgb8> for Rgb {
    fn from(px: Rgb8) -> Self {
        px.to_unit()
    }
}

impl Pixel for Rgb {
    const SPACE: ColorSpaceId = ColorSpaceId::Rgb;

    fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

// ============================================================================
// Cylindrical RGB models
// ============================================================================

/// Hue / saturation / value.
///
/// `h` in degrees [0, 360), `s` and `v` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue in degrees
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Value
    pub v: f64,
}

impl Hsv {
    /// Creates an HSV value.
    #[inline]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Image-buffer layout: `[h, s * 255, v * 255]`.
    #[inline]
    pub fn to_byte_scaled(self) -> [f64; 3] {
        [self.h, self.s * BYTE_MAX, self.v * BYTE_MAX]
    }

    /// Inverse of [`to_byte_scaled`](Self::to_byte_scaled).
    #[inline]
    pub fn from_byte_scaled(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1] / BYTE_MAX, arr[2] / BYTE_MAX)
    }
}

impl Pixel for Hsv {
    const SPACE: ColorSpaceId = ColorSpaceId::Hsv;

    fn to_array(self) -> [f64; 3] {
        [self.h, self.s, self.v]
    }

    fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

/// Hue / saturation / lightness.
///
/// `h` in degrees [0, 360), `s` and `l` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Lightness
    pub l: f64,
}

impl Hsl {
    /// Creates an HSL value.
    #[inline]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Image-buffer layout: `[h, s * 255, l * 255]`.
    #[inline]
    pub fn to_byte_scaled(self) -> [f64; 3] {
        [self.h, self.s * BYTE_MAX, self.l * BYTE_MAX]
    }

    /// Inverse of [`to_byte_scaled`](Self::to_byte_scaled).
    #[inline]
    pub fn from_byte_scaled(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1] / BYTE_MAX, arr[2] / BYTE_MAX)
    }
}

impl Pixel for Hsl {
    const SPACE: ColorSpaceId = ColorSpaceId::Hsl;

    fn to_array(self) -> [f64; 3] {
        [self.h, self.s, self.l]
    }

    fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

// ============================================================================
// CIE spaces
// ============================================================================

/// CIE 1931 XYZ, scaled so the reference white has Y = 100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    /// X
    pub x: f64,
    /// Y (luminance)
    pub y: f64,
    /// Z
    pub z: f64,
}

impl Xyz {
    /// Creates an XYZ value.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Pixel for Xyz {
    const SPACE: ColorSpaceId = ColorSpaceId::Xyz;

    fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

/// CIE 1976 L*a*b*.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness, 0 (black) to 100 (white)
    pub l: f64,
    /// Green (-) to red (+)
    pub a: f64,
    /// Blue (-) to yellow (+)
    pub b: f64,
}

impl Lab {
    /// Creates a LAB value.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, the radius in the a-b plane.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }
}

impl Pixel for Lab {
    const SPACE: ColorSpaceId = ColorSpaceId::Lab;

    fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

/// Cylindrical LAB: lightness, chroma, hue angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lch {
    /// Lightness, same as LAB
    pub l: f64,
    /// Chroma, >= 0
    pub c: f64,
    /// Hue angle in degrees [0, 360)
    pub h: f64,
}

impl Lch {
    /// Creates an LCH value.
    #[inline]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

impl Pixel for Lch {
    const SPACE: ColorSpaceId = ColorSpaceId::Lch;

    fn to_array(self) -> [f64; 3] {
        [self.l, self.c, self.h]
    }

    fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}
