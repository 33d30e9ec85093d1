//! Recoverable error types.
//!
//! Only model-file I/O and configuration loading can fail recoverably. Shape
//! and length mismatches elsewhere are caller bugs and panic instead.

use std::io;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Failure while saving or loading a model file.
///
/// A failed load never yields a partially built network.
#[derive(Debug, Error)]
pub enum NetworkIoError {
    #[error("model file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: invalid number: {source}")]
    ParseFloat {
        line: usize,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: invalid integer: {source}")]
    ParseInt {
        line: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("unsupported model format version {0}")]
    UnsupportedVersion(u32),

    #[error("unknown activation marker '{0}'")]
    UnknownActivation(String),
}

/// Failure while loading a training configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
