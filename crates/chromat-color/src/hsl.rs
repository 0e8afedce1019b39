//! RGB <-> HSL.
//!
//! ```text
//! L = (max + min) / 2
//! S = 0 if max == min else (max - min) / (1 - |2L - 1|)
//! H = hexcone hue (see crate::hue)
//! ```

use crate::hue::{Extrema, hue, sector};
use chromat_core::{BYTE_MAX, Hsl, Rgb, Rgb8};

/// Converts sRGB to HSL.
pub fn rgb_to_hsl(rgb: impl Into<Rgb>) -> Hsl {
    let rgb: Rgb = rgb.into();
    let ext = Extrema::of(rgb);
    let l = (ext.max + ext.min) / 2.0;
    let denom = 1.0 - (2.0 * l - 1.0).abs();
    let s = if ext.delta == 0.0 || denom == 0.0 {
        0.0
    } else {
        ext.delta / denom
    };
    Hsl::new(hue(rgb, ext), s, l)
}

/// Converts HSL to normalized sRGB without rounding.
pub fn hsl_to_rgb_unit(hsl: Hsl) -> Rgb {
    let c = (1.0 - (2.0 * hsl.l - 1.0).abs()) * hsl.s;
    let m = hsl.l - c / 2.0;
    let [r, g, b] = sector(hsl.h, c);
    Rgb::new(r + m, g + m, b + m)
}

/// Converts HSL to byte sRGB, rounding and clipping each channel.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb8 {
    let rgb = hsl_to_rgb_unit(hsl);
    Rgb8::from_f64_clamped([rgb.r * BYTE_MAX, rgb.g * BYTE_MAX, rgb.b * BYTE_MAX])
}
