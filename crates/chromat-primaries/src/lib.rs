//! # chromat-primaries
//!
//! White points, RGB primaries and RGB-XYZ matrix generation.
//!
//! The fixed sRGB matrices ([`SRGB_TO_XYZ`], [`XYZ_TO_SRGB`]) are the
//! published D65 tables and are what the conversions use. The same matrix
//! can be derived from the sRGB chromaticities with [`rgb_to_xyz_matrix`];
//! the two agree to the precision of the tables.
//!
//! # White Points
//!
//! A [`WhitePoint`] is the XYZ of the reference white with Y scaled to 100.
//! LAB encoding is relative to it, so every XYZ <-> LAB function takes one
//! explicitly. [`WhitePoint::D65`] is the default.
//!
//! # Usage
//!
//! ```rust
//! use chromat_primaries::{SRGB, WhitePoint, SRGB_TO_XYZ, rgb_to_xyz_matrix};
//!
//! let derived = rgb_to_xyz_matrix(&SRGB, &WhitePoint::D65).unwrap();
//! assert!(derived.max_abs_diff(&SRGB_TO_XYZ) < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - [`chromat-math`] - Matrix operations
//! - [`serde`] - White points in configuration files
//!
//! # Used By
//!
//! - `chromat-color` - RGB <-> XYZ <-> LAB

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use chromat_math::Mat3;
use serde::{Deserialize, Serialize};

// ============================================================================
// White Points
// ============================================================================

/// Reference white as XYZ tristimulus with Y = 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhitePoint {
    /// X of the white
    pub x: f64,
    /// Y of the white, 100 for the standard illuminants
    pub y: f64,
    /// Z of the white
    pub z: f64,
}

impl WhitePoint {
    /// CIE standard illuminant D65, 2 degree observer.
    pub const D65: Self = Self::new(95.047, 100.0, 108.883);

    /// CIE standard illuminant D50, 2 degree observer.
    pub const D50: Self = Self::new(96.422, 100.0, 82.521);

    /// Creates a white point from XYZ.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a white point from xy chromaticity, scaled to Y = 100.
    ///
    /// Returns `None` when `y` is zero.
    pub fn from_xy(x: f64, y: f64) -> Option<Self> {
        let [xx, yy, zz] = xy_to_xyz(x, y)?;
        Some(Self::new(xx * 100.0, yy * 100.0, zz * 100.0))
    }

    /// XYZ as an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// XYZ scaled to Y = 1.
    #[inline]
    pub fn to_unit(self) -> [f64; 3] {
        [self.x / 100.0, self.y / 100.0, self.z / 100.0]
    }
}

impl Default for WhitePoint {
    fn default() -> Self {
        Self::D65
    }
}

/// D65 white point chromaticity.
pub const D65_XY: (f64, f64) = (0.31270, 0.32900);

// ============================================================================
// Primaries
// ============================================================================

/// RGB color space primaries as CIE xy chromaticities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y)
    pub r: (f64, f64),
    /// Green primary (x, y)
    pub g: (f64, f64),
    /// Blue primary (x, y)
    pub b: (f64, f64),
    /// Color space name
    pub name: &'static str,
}

/// sRGB / Rec.709 primaries.
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    name: "sRGB",
};

/// Converts xy chromaticity to XYZ with Y = 1.
fn xy_to_xyz(x: f64, y: f64) -> Option<[f64; 3]> {
    if y.abs() < 1e-12 {
        None
    } else {
        Some([x / y, 1.0, (1.0 - x - y) / y])
    }
}

/// Computes the linear RGB to XYZ (Y = 1) matrix for a set of primaries.
///
/// # Algorithm
///
/// 1. Convert the primaries' xy chromaticities to XYZ (Y = 1)
/// 2. Solve for per-primary scale factors so RGB (1, 1, 1) maps to the white
/// 3. Scale each column by its factor
///
/// Returns `None` for degenerate primaries (zero y, or collinear).
pub fn rgb_to_xyz_matrix(primaries: &Primaries, white: &WhitePoint) -> Option<Mat3> {
    let r = xy_to_xyz(primaries.r.0, primaries.r.1)?;
    let g = xy_to_xyz(primaries.g.0, primaries.g.1)?;
    let b = xy_to_xyz(primaries.b.0, primaries.b.1)?;

    let m = Mat3::from_cols([r, g, b]);
    let s = m.inverse()? * white.to_unit();

    let scale = |col: [f64; 3], k: f64| [col[0] * k, col[1] * k, col[2] * k];
    Some(Mat3::from_cols([
        scale(r, s[0]),
        scale(g, s[1]),
        scale(b, s[2]),
    ]))
}

/// Computes the XYZ (Y = 1) to linear RGB matrix, the inverse of
/// [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(primaries: &Primaries, white: &WhitePoint) -> Option<Mat3> {
    rgb_to_xyz_matrix(primaries, white)?.inverse()
}

// ============================================================================
// Pre-computed Matrices
// ============================================================================

/// Linear sRGB to XYZ (D65) matrix.
pub const SRGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

/// XYZ (D65) to linear sRGB matrix.
pub const XYZ_TO_SRGB: Mat3 = Mat3::from_rows([
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
]);
