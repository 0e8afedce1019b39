//! # chromat-math
//!
//! Math utilities for color conversion.
//!
//! - [`Mat3`] - 3x3 matrices for linear color transforms
//! - [`angle`] - degree/radian helpers and hue wrapping
//!
//! # Design
//!
//! [`Mat3`] keeps its own row-major storage so matrices can be written as
//! `const` tables exactly as they are published. Products and inverses go
//! through [`glam::DMat3`]. All matrices use **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use chromat_math::Mat3;
//!
//! const RGB_TO_XYZ: Mat3 = Mat3::from_rows([
//!     [0.4124564, 0.3575761, 0.1804375],
//!     [0.2126729, 0.7151522, 0.0721750],
//!     [0.0193339, 0.1191920, 0.9503041],
//! ]);
//!
//! let xyz = RGB_TO_XYZ.transform([1.0, 1.0, 1.0]);
//! assert!((xyz[1] - 1.0).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - Double-precision matrix products and inverses
//!
//! # Used By
//!
//! - `chromat-primaries` - RGB/XYZ matrix tables and derivation
//! - `chromat-color` - Matrix stages, polar remap

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod angle;
mod mat3;

pub use mat3::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{DMat3, DVec3};
}
