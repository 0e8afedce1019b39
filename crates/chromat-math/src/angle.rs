//! Angle helpers.
//!
//! Hues in chromat are degrees in [0, 360). These helpers keep the
//! conversions and wrapping in one place.

/// Converts degrees to radians.
#[inline]
pub fn to_radians(deg: f64) -> f64 {
    deg.to_radians()
}

/// Converts radians to degrees.
#[inline]
pub fn to_degrees(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Wraps an angle in degrees into [0, 360).
///
/// ```rust
/// use chromat_math::angle::wrap_degrees;
///
/// assert_eq!(wrap_degrees(370.0), 10.0);
/// assert_eq!(wrap_degrees(-30.0), 330.0);
/// assert_eq!(wrap_degrees(360.0), 0.0);
/// ```
#[inline]
pub fn wrap_degrees(deg: f64) -> f64 {
    let w = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if w >= 360.0 { 0.0 } else { w }
}

/// Polar angle of `(x, y)` in degrees, in [0, 360).
#[inline]
pub fn atan2_degrees(y: f64, x: f64) -> f64 {
    wrap_degrees(y.atan2(x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(720.0), 0.0);
        assert_eq!(wrap_degrees(-1e-20), 0.0);
        assert_relative_eq!(wrap_degrees(-90.0), 270.0);
    }

    #[test]
    fn test_atan2() {
        assert_relative_eq!(atan2_degrees(1.0, 0.0), 90.0);
        assert_relative_eq!(atan2_degrees(-1.0, 0.0), 270.0);
        assert_relative_eq!(atan2_degrees(0.0, -1.0), 180.0);
        assert_eq!(atan2_degrees(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_radians() {
        assert_relative_eq!(to_radians(180.0), std::f64::consts::PI);
        assert_relative_eq!(to_degrees(std::f64::consts::FRAC_PI_2), 90.0);
    }
}
