//! # chromat-color
//!
//! Colorimetric conversions, color difference and conversion pipelines.
//!
//! This crate combines the color math of the workspace into one API:
//!
//! - **MatrixTransform** - sRGB <-> CIE XYZ ([`xyz`])
//! - **LabCodec** - XYZ <-> CIELAB against a white point ([`lab`])
//! - **PolarRemap** - LAB <-> LCH ([`lch`])
//! - **HsvHslCodec** - RGB <-> HSV and RGB <-> HSL ([`hsv`], [`hsl`])
//! - **DeltaEEngine** - CIE76, CIE94, CIEDE2000 and a perceptual reading ([`delta_e`])
//! - **PipelineComposer** - typed chains ([`convert`]), runtime
//!   [`Pipeline`]s, the bulk [`ColorProcessor`] and [`bulk`] helpers
//!
//! # Architecture
//!
//! ```text
//!                   chromat-color
//!                        |
//!     +------------------+------------------+
//!     |                  |                  |
//! chromat-transfer  chromat-primaries   chromat-core
//!     |                  |
//!     +--------+---------+
//!              |
//!         chromat-math
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use chromat_color::prelude::*;
//!
//! let a = rgb_to_lab(Rgb8::new(255, 0, 0));
//! let b = rgb_to_lab(Rgb8::new(250, 10, 5));
//!
//! let de = DeltaE::Ciede2000.compute(a, b);
//! assert!(interpret(de) <= Perception::Noticeable);
//!
//! // The type system picks the conversion.
//! let hsv: Hsv = Rgb8::new(255, 0, 0).convert();
//! assert_eq!(hsv, Hsv::new(0.0, 1.0, 1.0));
//! ```
//!
//! # Conventions
//!
//! | Space | Range |
//! |-------|-------|
//! | `Rgb8` | 0-255 per channel |
//! | `Rgb` | 0-1 per channel, sRGB-encoded |
//! | `Hsv` / `Hsl` | H in [0, 360), S and V/L in [0, 1] |
//! | `Xyz` | Y = 100 for the D65 white |
//! | `Lab` | L in [0, 100] |
//! | `Lch` | C >= 0, h in [0, 360) |
//!
//! # Dependencies
//!
//! - [`chromat-core`] - Typed triples, `Image`, `ColorSpaceId`
//! - [`chromat-math`] - `Mat3`, angle helpers
//! - [`chromat-transfer`] - sRGB gamma
//! - [`chromat-primaries`] - White points and RGB/XYZ matrices
//!
//! # Used By
//!
//! - `chromat-ops` - Segmentation, Delta E masks, clustering

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod pipeline;
mod processor;
pub mod bulk;
pub mod convert;
pub mod delta_e;
pub mod hsl;
pub mod hsv;
pub mod hue;
pub mod lab;
pub mod lch;
pub mod xyz;

pub use convert::{Convert, convert_slice};
pub use delta_e::{Cie94Application, DeltaE, Perception, interpret};
pub use error::{ColorError, ColorResult};
pub use pipeline::{Pipeline, Stage};
pub use processor::ColorProcessor;

// Re-export sub-crates for convenience
pub use chromat_math as math;
pub use chromat_primaries as primaries;
pub use chromat_transfer as transfer;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::{
        Cie94Application, ColorError, ColorProcessor, ColorResult, Convert, DeltaE, Perception,
        Pipeline, Stage, interpret,
    };

    pub use crate::convert::{
        lab_to_rgb, lch_to_rgb, lch_to_xyz, rgb_to_lab, rgb_to_lch, xyz_to_lch,
    };
    pub use crate::delta_e::{cie76, cie94, ciede2000};
    pub use crate::hsl::{hsl_to_rgb, rgb_to_hsl};
    pub use crate::hsv::{hsv_to_rgb, rgb_to_hsv};
    pub use crate::lab::{lab_to_xyz, lab_to_xyz_d65, xyz_to_lab, xyz_to_lab_d65};
    pub use crate::lch::{lab_to_lch, lch_to_lab};
    pub use crate::xyz::{rgb_to_xyz, xyz_to_rgb};

    pub use chromat_core::{Hsl, Hsv, Image, Lab, Lch, Pixel, Rgb, Rgb8, RgbScale, Xyz};
    pub use chromat_primaries::WhitePoint;
    pub use chromat_transfer::{gamma_compress, gamma_expand};
}
