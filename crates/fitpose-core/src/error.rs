//! Error types for the FitPose core.
//!
//! Uses [`thiserror`] for automatic `Display` and `Error` implementations.
//! All errors here describe caller mistakes (bad configuration, malformed
//! input); runtime faults of the pose-estimation collaborator are handled
//! by the engine and never surface through these types.

use thiserror::Error;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by core types and utilities.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Validation error for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Exercise name that does not map to a supported exercise.
    ///
    /// Unknown exercises are rejected at configuration time rather than
    /// silently falling back to a no-counting mode.
    #[error("Unknown exercise type: '{name}' (expected pushups, situps or pullups)")]
    UnknownExercise {
        /// The unrecognized exercise name
        name: String,
    },

    /// A pose frame with the wrong number of keypoints.
    #[error("Malformed pose frame: expected {expected} keypoints, got {actual}")]
    MalformedFrame {
        /// Expected keypoint count
        expected: usize,
        /// Actual keypoint count
        actual: usize,
    },
}

impl CoreError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a configuration error with the given message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
