//! # chromat-transfer
//!
//! The sRGB transfer function, which maps between gamma-encoded sRGB
//! channel values and linear light.
//!
//! # Terminology
//!
//! - **EOTF** (Electro-Optical Transfer Function): Encoded -> Linear ("gamma expand")
//! - **OETF** (Opto-Electronic Transfer Function): Linear -> Encoded ("gamma compress")
//!
//! # Usage
//!
//! ```rust
//! use chromat_transfer::{gamma_compress, gamma_expand};
//!
//! let linear = gamma_expand(0.5);
//! let encoded = gamma_compress(linear);
//! assert!((encoded - 0.5).abs() < 1e-12);
//! ```
//!
//! Both directions accept any finite input and never fail. Values outside
//! [0, 1] follow the same piecewise formula (the linear segment below the
//! break point, the power segment above it).
//!
//! # Used By
//!
//! - `chromat-color` - RGB <-> XYZ
//! - `chromat-primaries` - Fixed sRGB matrices are applied to linear values

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod srgb;

pub use srgb::{eotf as gamma_expand, eotf_rgb as gamma_expand_rgb};
pub use srgb::{oetf as gamma_compress, oetf_rgb as gamma_compress_rgb};
