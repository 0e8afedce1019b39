//! Error types for segmentation, morphology and clustering.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Color name outside the closed set of named ranges.
    #[error("unknown color: {name} (options: {options})")]
    UnknownColor {
        /// The rejected name.
        name: String,
        /// Accepted names, comma separated.
        options: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffers have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// I/O error reading config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Color conversion or metric error.
    #[error(transparent)]
    Color(#[from] chromat_color::ColorError),

    /// Core buffer error.
    #[error(transparent)]
    Core(#[from] chromat_core::Error),
}

impl OpsError {
    /// Shorthand for [`OpsError::InvalidParameter`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
