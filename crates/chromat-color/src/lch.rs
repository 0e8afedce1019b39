//! LAB <-> LCH polar remap.
//!
//! `C = hypot(a, b)`, `h = atan2(b, a)` in degrees, wrapped into [0, 360).
//! Below [`CHROMA_EPSILON`] the hue is undefined and set to 0.

use chromat_core::{Lab, Lch};
use chromat_math::angle::{atan2_degrees, to_radians};

/// Chroma below which the hue angle is reported as 0.
pub const CHROMA_EPSILON: f64 = 1e-10;

/// Converts LAB to LCH.
///
/// ```rust
/// use chromat_color::lch::lab_to_lch;
/// use chromat_core::Lab;
///
/// let lch = lab_to_lch(Lab::new(50.0, 0.0, -10.0));
/// assert_eq!(lch.c, 10.0);
/// assert_eq!(lch.h, 270.0);
/// ```
#[inline]
pub fn lab_to_lch(lab: Lab) -> Lch {
    let c = lab.a.hypot(lab.b);
    let h = if c < CHROMA_EPSILON {
        0.0
    } else {
        atan2_degrees(lab.b, lab.a)
    };
    Lch::new(lab.l, c, h)
}

/// Converts LCH to LAB.
#[inline]
pub fn lch_to_lab(lch: Lch) -> Lab {
    let (sin, cos) = to_radians(lch.h).sin_cos();
    Lab::new(lch.l, lch.c * cos, lch.c * sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_axes() {
        assert_abs_diff_eq!(lab_to_lch(Lab::new(50.0, 10.0, 0.0)).h, 0.0);
        assert_abs_diff_eq!(lab_to_lch(Lab::new(50.0, 0.0, 10.0)).h, 90.0);
        assert_abs_diff_eq!(lab_to_lch(Lab::new(50.0, -10.0, 0.0)).h, 180.0);
    }

    #[test]
    fn test_degenerate_hue() {
        let lch = lab_to_lch(Lab::new(42.0, 0.0, 0.0));
        assert_eq!(lch, Lch::new(42.0, 0.0, 0.0));
        let tiny = lab_to_lch(Lab::new(42.0, 1e-12, -1e-12));
        assert_eq!(tiny.h, 0.0);
    }

    #[test]
    fn test_hue_range() {
        for deg in (0..360).step_by(15) {
            let lab = lch_to_lab(Lch::new(60.0, 25.0, deg as f64));
            let lch = lab_to_lch(lab);
            assert!(lch.h >= 0.0 && lch.h < 360.0);
            assert_abs_diff_eq!(lch.h, deg as f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_roundtrip() {
        let lab = Lab::new(53.24, 80.09, 67.20);
        let back = lch_to_lab(lab_to_lch(lab));
        assert_abs_diff_eq!(back.a, lab.a, epsilon = 1e-9);
        assert_abs_diff_eq!(back.b, lab.b, epsilon = 1e-9);
        assert_eq!(back.l, lab.l);
    }
}
