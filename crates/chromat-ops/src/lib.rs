//! # chromat-ops
//!
//! Color segmentation and palette operations on top of `chromat-color`.
//!
//! # Modules
//!
//! - [`segment`] - HSV band segmentation into binary masks
//! - [`morphology`] - Erosion, dilation, opening, closing and refinement
//! - [`grouping`] - Delta E masks, greedy color grouping, palette mapping
//! - [`cluster`] - Dominant colors through k-means in LAB
//! - [`config`] - YAML configuration for segmentation runs
//!
//! # Example
//!
//! ```rust
//! use chromat_core::{Image, Rgb8};
//! use chromat_ops::{NamedRange, morphology, segment};
//!
//! let img = Image::from_fn(9, 9, |x, y| {
//!     if (2..7).contains(&x) && (2..7).contains(&y) {
//!         Rgb8::new(230, 20, 20)
//!     } else {
//!         Rgb8::new(20, 20, 230)
//!     }
//! });
//!
//! let red = segment::segment(&img, NamedRange::Red);
//! assert_eq!(red.count(), 25);
//!
//! let cleaned = morphology::refine(&red, 3, 3).unwrap();
//! assert_eq!(cleaned.count(), 25);
//! ```
//!
//! # Common Operations
//!
//! ## Delta E mask
//!
//! ```rust,ignore
//! use chromat_ops::grouping::delta_e_mask;
//!
//! let lab = chromat_color::bulk::rgb_image_to_lab(&image);
//! let near = delta_e_mask(&lab, reference, 30.0, DeltaE::Ciede2000);
//! ```
//!
//! ## Dominant colors
//!
//! ```rust,ignore
//! use chromat_ops::cluster::{KMeans, dominant_colors};
//!
//! let palette = dominant_colors(&image, 8, &KMeans::default())?;
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - rayon for morphology rows and k-means assignment
//!
//! # Dependencies
//!
//! - [`chromat_core`] - Image and mask buffers
//! - [`chromat_color`] - Conversions and Delta E
//! - `serde`, `serde_yaml` - Configuration
//! - `thiserror`, `tracing` - Errors and logging

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod cluster;
pub mod config;
pub mod grouping;
pub mod morphology;
pub mod segment;

pub use cluster::{Clusterer, Clustering, KMeans};
pub use config::SegmentationConfig;
pub use error::{OpsError, OpsResult};
pub use morphology::{ElementShape, StructuringElement};
pub use segment::{HsvRange, NamedRange};
