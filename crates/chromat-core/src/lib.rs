//! # chromat-core
//!
//! Core types for color conversion.
//!
//! This crate provides the foundational types used throughout chromat:
//!
//! - [`Pixel`] and the typed triples [`Rgb8`], [`Rgb`], [`Hsv`], [`Hsl`],
//!   [`Xyz`], [`Lab`], [`Lch`]
//! - [`ColorSpaceId`] - Runtime names of the supported spaces
//! - [`Image`] - Row-major buffer of one pixel type
//! - [`Mask`] - Binary single-channel buffer
//!
//! ## Design Philosophy
//!
//! A triple of numbers means nothing until its space is known. Every space
//! gets its own type, so passing LAB where XYZ is expected is a compile error:
//!
//! ```ignore
//! let lab: Lab = rgb_to_lab(Rgb8::new(255, 0, 0));
//! let rgb = xyz_to_rgb(lab); // Compile error!
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! chromat-core (this crate)
//!    ^
//!    |
//!    +-- chromat-math (Mat3, angles)
//!    +-- chromat-transfer (sRGB gamma)
//!    +-- chromat-primaries (white point, RGB<->XYZ matrices)
//!    +-- chromat-color (conversions, Delta E, pipelines)
//!    +-- chromat-ops (segmentation, morphology, clustering)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorspace;
pub mod error;
pub mod image;
pub mod mask;
pub mod pixel;

pub use colorspace::*;
pub use error::*;
pub use image::*;
pub use mask::*;
pub use pixel::{BYTE_MAX, Hsl, Hsv, Lab, Lch, Pixel, Rgb, Rgb8, RgbScale, Xyz, clamp_byte};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use chromat_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colorspace::ColorSpaceId;
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::mask::Mask;
    pub use crate::pixel::{Hsl, Hsv, Lab, Lch, Pixel, Rgb, Rgb8, RgbScale, Xyz};
}
