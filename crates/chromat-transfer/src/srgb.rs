//! sRGB transfer function.
//!
//! A piecewise function: a linear segment near black and a 2.4 power
//! curve for the rest.
//!
//! # Range
//!
//! - Input/Output: [0, 1]
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

/// Encoded threshold of the linear segment.
pub const ENCODED_BREAK: f64 = 0.04045;
/// Linear threshold of the linear segment.
pub const LINEAR_BREAK: f64 = 0.0031308;
/// Slope of the linear segment.
pub const LINEAR_SLOPE: f64 = 12.92;
/// Offset of the power segment.
pub const OFFSET: f64 = 0.055;
/// Exponent of the power segment.
pub const GAMMA: f64 = 2.4;

/// sRGB EOTF: decodes sRGB encoded values to linear light.
///
/// # Formula
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// # Example
///
/// ```rust
/// use chromat_transfer::srgb::eotf;
///
/// let linear = eotf(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn eotf(v: f64) -> f64 {
    if v <= ENCODED_BREAK {
        v / LINEAR_SLOPE
    } else {
        ((v + OFFSET) / (1.0 + OFFSET)).powf(GAMMA)
    }
}

/// sRGB OETF: encodes linear light to sRGB.
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
#[inline]
pub fn oetf(l: f64) -> f64 {
    if l <= LINEAR_BREAK {
        l * LINEAR_SLOPE
    } else {
        (1.0 + OFFSET) * l.powf(1.0 / GAMMA) - OFFSET
    }
}

/// Applies sRGB EOTF to an RGB triplet.
#[inline]
pub fn eotf_rgb(rgb: [f64; 3]) -> [f64; 3] {
    [eotf(rgb[0]), eotf(rgb[1]), eotf(rgb[2])]
}

/// Applies sRGB OETF to an RGB triplet.
#[inline]
pub fn oetf_rgb(rgb: [f64; 3]) -> [f64; 3] {
    [oetf(rgb[0]), oetf(rgb[1]), oetf(rgb[2])]
}
