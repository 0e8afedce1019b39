//! Error types for color operations.
//!
//! The conversion and metric functions never fail on finite input.
//! Errors come from the edges: parsing a metric name, inverting a
//! pipeline stage that has no inverse, or a malformed buffer handed in
//! from outside.

use thiserror::Error;

/// Color operation error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    /// A Delta E metric name did not match any known metric.
    #[error("unknown delta E metric '{name}' (expected one of: {options})")]
    UnknownMetric {
        /// The rejected name
        name: String,
        /// Comma-separated accepted names
        options: String,
    },

    /// A pipeline stage has no inverse.
    #[error("stage {index} ({stage}) is not invertible")]
    NonInvertible {
        /// Position of the stage in the pipeline
        index: usize,
        /// Debug name of the stage
        stage: String,
    },

    /// Core buffer or argument error.
    #[error(transparent)]
    Core(#[from] chromat_core::Error),
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
