//! RGB <-> HSV.
//!
//! ```text
//! V = max
//! S = 0 if max == 0 else (max - min) / max
//! H = hexcone hue (see crate::hue)
//! ```
//!
//! The inverse rounds to bytes and clips to [0, 255].

use crate::hue::{Extrema, hue, sector};
use chromat_core::{BYTE_MAX, Hsv, Rgb, Rgb8};

/// Converts sRGB to HSV.
///
/// ```rust
/// use chromat_color::hsv::rgb_to_hsv;
/// use chromat_core::{Hsv, Rgb8};
///
/// assert_eq!(rgb_to_hsv(Rgb8::new(255, 0, 0)), Hsv::new(0.0, 1.0, 1.0));
/// ```
pub fn rgb_to_hsv(rgb: impl Into<Rgb>) -> Hsv {
    let rgb: Rgb = rgb.into();
    let ext = Extrema::of(rgb);
    let s = if ext.max == 0.0 {
        0.0
    } else {
        ext.delta / ext.max
    };
    Hsv::new(hue(rgb, ext), s, ext.max)
}

/// Converts HSV to normalized sRGB without rounding.
pub fn hsv_to_rgb_unit(hsv: Hsv) -> Rgb {
    let c = hsv.v * hsv.s;
    let m = hsv.v - c;
    let [r, g, b] = sector(hsv.h, c);
    Rgb::new(r + m, g + m, b + m)
}

/// Converts HSV to byte sRGB, rounding and clipping each channel.
///
/// ```rust
/// use chromat_color::hsv::hsv_to_rgb;
/// use chromat_core::{Hsv, Rgb8};
///
/// assert_eq!(hsv_to_rgb(Hsv::new(0.0, 0.0, 0.5)), Rgb8::new(128, 128, 128));
/// ```
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb8 {
    let rgb = hsv_to_rgb_unit(hsv);
    Rgb8::from_f64_clamped([rgb.r * BYTE_MAX, rgb.g * BYTE_MAX, rgb.b * BYTE_MAX])
}
