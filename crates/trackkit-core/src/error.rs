//! Error handling for TrackKit
//!
//! Provides the error types shared by all layers of the editor:
//! - Track errors (rejected segment requests and editor mode violations)
//! - I/O and serialization errors raised by persistence and export
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Track error type
///
/// Raised by the geometry calculator and the track builder. Every variant is
/// reported before any state is mutated, so a failed call leaves the track,
/// the pose and the undo log exactly as they were.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    /// A segment or sampling parameter is out of range
    #[error("Invalid parameter '{param}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        param: String,
        /// The reason the parameter is invalid.
        reason: String,
    },

    /// The operation is not allowed in the current editor mode
    #[error("Cannot {operation} while {mode}")]
    InvalidMode {
        /// The active editor mode.
        mode: String,
        /// The rejected operation.
        operation: String,
    },
}

impl TrackError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackError::InvalidParameter {
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Validates that a value is finite and strictly positive.
    pub fn require_positive(param: &str, value: f64) -> std::result::Result<f64, TrackError> {
        if !value.is_finite() {
            return Err(Self::invalid_parameter(param, format!("{value} is not finite")));
        }
        if value <= 0.0 {
            return Err(Self::invalid_parameter(
                param,
                format!("must be greater than zero, got {value}"),
            ));
        }
        Ok(value)
    }
}

/// Main error type for TrackKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Track error
    #[error(transparent)]
    Track(#[from] TrackError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a track error
    pub fn is_track_error(&self) -> bool {
        matches!(self, Error::Track(_))
    }

    /// Check if this is an invalid parameter error
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::Track(TrackError::InvalidParameter { .. }))
    }

    /// Check if this is an I/O error
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
