//! Hexcone hue shared by HSV and HSL.
//!
//! Both models use the same hue: the position of the largest channel on a
//! six-sector color wheel, in degrees.

use chromat_core::Rgb;
use chromat_math::angle::wrap_degrees;

/// Max, min and their difference for one RGB triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    /// Largest channel
    pub max: f64,
    /// Smallest channel
    pub min: f64,
    /// `max - min`, the chroma in RGB units
    pub delta: f64,
}

impl Extrema {
    /// Computes the extrema of `rgb`.
    #[inline]
    pub fn of(rgb: Rgb) -> Self {
        let max = rgb.max_channel();
        let min = rgb.min_channel();
        Self {
            max,
            min,
            delta: max - min,
        }
    }
}

/// Hue in degrees [0, 360). Achromatic input (delta 0) gives 0.
pub fn hue(rgb: Rgb, ext: Extrema) -> f64 {
    let Extrema { max, delta, .. } = ext;
    if delta == 0.0 {
        return 0.0;
    }
    let h = if max == rgb.r {
        60.0 * ((rgb.g - rgb.b) / delta).rem_euclid(6.0)
    } else if max == rgb.g {
        60.0 * ((rgb.b - rgb.r) / delta + 2.0)
    } else {
        60.0 * ((rgb.r - rgb.g) / delta + 4.0)
    };
    wrap_degrees(h)
}

/// Places chroma `c` on the color wheel at hue `h`.
///
/// Returns `(R', G', B')` before the lightness offset is added. The hue is
/// wrapped into [0, 360) first.
pub fn sector(h: f64, c: f64) -> [f64; 3] {
    let h = wrap_degrees(h);
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    match (h / 60.0) as u32 {
        0 => [c, x, 0.0],
        1 => [x, c, 0.0],
        2 => [0.0, c, x],
        3 => [0.0, x, c],
        4 => [x, 0.0, c],
        _ => [c, 0.0, x],
    }
}
