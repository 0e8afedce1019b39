//! sRGB <-> CIE XYZ.
//!
//! Forward: gamma-expand each channel, multiply by [`SRGB_TO_XYZ`], scale
//! to Y = 100. Inverse: scale to Y = 1, multiply by [`XYZ_TO_SRGB`], clip
//! the linear result to [0, 1], gamma-compress, round to bytes.
//!
//! The inverse is lossy for colors outside the sRGB gamut: they saturate
//! instead of failing.
//!
//! ```rust
//! use chromat_color::xyz::{rgb_to_xyz, xyz_to_rgb};
//! use chromat_core::Rgb8;
//!
//! let orange = Rgb8::new(255, 128, 0);
//! assert_eq!(xyz_to_rgb(rgb_to_xyz(orange)), orange);
//! ```

use chromat_core::{Rgb, Rgb8, Xyz};
use chromat_primaries::{SRGB_TO_XYZ, XYZ_TO_SRGB};
use chromat_transfer::{gamma_compress_rgb, gamma_expand_rgb};

/// XYZ scale: the white point has Y = 100.
pub const XYZ_SCALE: f64 = 100.0;

/// Converts gamma-encoded sRGB to linear light.
#[inline]
pub fn rgb_to_linear(rgb: impl Into<Rgb>) -> [f64; 3] {
    let rgb: Rgb = rgb.into();
    gamma_expand_rgb([rgb.r, rgb.g, rgb.b])
}

/// Converts sRGB to XYZ (D65, Y in [0, 100]).
///
/// Accepts byte ([`Rgb8`]) or normalized ([`Rgb`]) input.
#[inline]
pub fn rgb_to_xyz(rgb: impl Into<Rgb>) -> Xyz {
    let [x, y, z] = SRGB_TO_XYZ.transform(rgb_to_linear(rgb));
    Xyz::new(x * XYZ_SCALE, y * XYZ_SCALE, z * XYZ_SCALE)
}

/// Converts XYZ to linear sRGB without clipping.
///
/// Components outside [0, 1] mean the color is out of gamut.
#[inline]
pub fn xyz_to_linear_rgb(xyz: Xyz) -> [f64; 3] {
    XYZ_TO_SRGB.transform([
        xyz.x / XYZ_SCALE,
        xyz.y / XYZ_SCALE,
        xyz.z / XYZ_SCALE,
    ])
}

/// Whether `xyz` lies inside the sRGB gamut, with tolerance `eps` in linear units.
pub fn in_srgb_gamut(xyz: Xyz, eps: f64) -> bool {
    xyz_to_linear_rgb(xyz)
        .iter()
        .all(|&c| c >= -eps && c <= 1.0 + eps)
}

/// Converts XYZ to normalized sRGB, clipping linear values to [0, 1].
#[inline]
pub fn xyz_to_rgb_unit(xyz: Xyz) -> Rgb {
    let linear = xyz_to_linear_rgb(xyz).map(|c| c.clamp(0.0, 1.0));
    let [r, g, b] = gamma_compress_rgb(linear);
    Rgb::new(r, g, b)
}

/// Converts XYZ to byte sRGB.
///
/// Out-of-gamut colors saturate.
#[inline]
pub fn xyz_to_rgb(xyz: Xyz) -> Rgb8 {
    xyz_to_rgb_unit(xyz).to_rgb8()
}
