//! CIE XYZ <-> CIELAB.
//!
//! # Formula
//!
//! ```text
//! f(t)  = t^(1/3)              if t > δ³
//!       = (κ t + 16) / 116     otherwise
//!
//! L = 116 f(Y/Yn) - 16
//! a = 500 (f(X/Xn) - f(Y/Yn))
//! b = 200 (f(Y/Yn) - f(Z/Zn))
//! ```
//!
//! with δ = 6/29 and κ = 24389/27. LAB is relative to a white point, so
//! both directions take one explicitly; the `_d65` helpers use
//! [`WhitePoint::D65`].
//!
//! ```rust
//! use chromat_color::lab::{lab_to_xyz_d65, xyz_to_lab_d65};
//! use chromat_core::Xyz;
//!
//! let xyz = Xyz::new(20.0, 30.0, 40.0);
//! let back = lab_to_xyz_d65(xyz_to_lab_d65(xyz));
//! assert!((back.y - 30.0).abs() < 1e-9);
//! ```

use chromat_core::{Lab, Xyz};
use chromat_primaries::WhitePoint;

/// δ = 6/29, the break of `f⁻¹`.
pub const DELTA: f64 = 6.0 / 29.0;
/// δ³ = 216/24389, the break of `f`.
pub const DELTA_CUBE: f64 = 216.0 / 24389.0;
/// κ = 24389/27, slope of the linear segment.
pub const KAPPA: f64 = 24389.0 / 27.0;

/// CIE forward nonlinearity.
#[inline]
pub fn f(t: f64) -> f64 {
    if t > DELTA_CUBE {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

/// Inverse of [`f`].
#[inline]
pub fn f_inverse(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        (116.0 * t - 16.0) / KAPPA
    }
}

/// Converts XYZ to LAB relative to `white`.
pub fn xyz_to_lab(xyz: Xyz, white: &WhitePoint) -> Lab {
    let fx = f(xyz.x / white.x);
    let fy = f(xyz.y / white.y);
    let fz = f(xyz.z / white.z);
    Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Converts LAB to XYZ relative to `white`.
pub fn lab_to_xyz(lab: Lab, white: &WhitePoint) -> Xyz {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;
    Xyz::new(
        white.x * f_inverse(fx),
        white.y * f_inverse(fy),
        white.z * f_inverse(fz),
    )
}

/// [`xyz_to_lab`] under D65.
#[inline]
pub fn xyz_to_lab_d65(xyz: Xyz) -> Lab {
    xyz_to_lab(xyz, &WhitePoint::D65)
}

/// [`lab_to_xyz`] under D65.
#[inline]
pub fn lab_to_xyz_d65(lab: Lab) -> Xyz {
    lab_to_xyz(lab, &WhitePoint::D65)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_f_continuous() {
        let below = (KAPPA * DELTA_CUBE + 16.0) / 116.0;
        assert_abs_diff_eq!(below, DELTA_CUBE.cbrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(f_inverse(f(0.5)), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(f_inverse(f(0.001)), 0.001, epsilon = 1e-12);
    }

    #[test]
    fn test_white_is_neutral() {
        let w = WhitePoint::D65;
        let lab = xyz_to_lab(Xyz::new(w.x, w.y, w.z), &w);
        assert_abs_diff_eq!(lab.l, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.a, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.b, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_black() {
        let lab = xyz_to_lab_d65(Xyz::default());
        assert_abs_diff_eq!(lab.l, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_roundtrip_grid() {
        for x in (0..=95).step_by(5) {
            for y in (0..=100).step_by(5) {
                for z in (0..=105).step_by(7) {
                    let xyz = Xyz::new(x as f64, y as f64, z as f64);
                    let back = lab_to_xyz_d65(xyz_to_lab_d65(xyz));
                    assert_abs_diff_eq!(back.x, xyz.x, epsilon = 0.01);
                    assert_abs_diff_eq!(back.y, xyz.y, epsilon = 0.01);
                    assert_abs_diff_eq!(back.z, xyz.z, epsilon = 0.01);
                }
            }
        }
    }

    #[test]
    fn test_other_white() {
        let w = WhitePoint::D50;
        let lab = xyz_to_lab(Xyz::new(w.x, w.y, w.z), &w);
        assert_abs_diff_eq!(lab.l, 100.0, epsilon = 1e-9);
        // The same XYZ is not neutral under D65.
        let under_d65 = xyz_to_lab_d65(Xyz::new(w.x, w.y, w.z));
        assert!(under_d65.b > 10.0);
    }
}
