//! Error types for chromat-core operations.
//!
//! The conversion math itself never fails on finite input. Errors only
//! appear at the boundary: building a typed triple from a slice of the
//! wrong length, naming a color space that does not exist, or handing an
//! image buffer a pixel vector that does not match its dimensions.
//!
//! # Usage
//!
//! ```rust
//! use chromat_core::{Error, Result};
//!
//! fn check_arity(values: &[f64]) -> Result<()> {
//!     if values.len() != 3 {
//!         return Err(Error::arity(3, values.len()));
//!     }
//!     Ok(())
//! }
//! assert!(check_arity(&[1.0, 2.0]).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::pixel::Pixel::try_from_slice`] - Arity validation
//! - [`crate::colorspace::ColorSpaceId`] - Name parsing
//! - [`crate::image::Image`] and [`crate::mask::Mask`] - Buffer construction
//! - `chromat-color`, `chromat-ops` - wrapped in their own error enums

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in core color and buffer handling.
///
/// # Categories
///
/// - **Argument errors**: [`InvalidArity`](Error::InvalidArity)
/// - **Identifier errors**: [`UnknownColorSpace`](Error::UnknownColorSpace)
/// - **Dimension errors**: [`DimensionMismatch`](Error::DimensionMismatch), [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A color triple was built from a slice with the wrong number of components.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chromat_core::Error;
    ///
    /// let err = Error::arity(3, 4);
    /// assert!(err.to_string().contains("expected 3"));
    /// ```
    #[error("invalid arity: expected {expected} components, got {got}")]
    InvalidArity {
        /// Number of components the color space needs
        expected: usize,
        /// Number of components supplied
        got: usize,
    },

    /// A color space name did not match any supported space.
    #[error("unknown color space '{name}' (expected one of: {options})")]
    UnknownColorSpace {
        /// The rejected name
        name: String,
        /// Comma-separated list of accepted names
        options: String,
    },

    /// Pixel coordinates are outside the buffer.
    #[error("pixel ({x}, {y}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// X coordinate
        x: u32,
        /// Y coordinate
        y: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Two buffers that must share a shape do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Buffer data length does not match the requested dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidArity`] error.
    #[inline]
    pub fn arity(expected: usize, got: usize) -> Self {
        Self::InvalidArity { expected, got }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error was caused by a malformed argument
    /// rather than a buffer shape problem.
    #[inline]
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidArity { .. } | Self::UnknownColorSpace { .. })
    }
}
