//! The seam to the external pose-estimation collaborator.

use async_trait::async_trait;
use fitpose_core::PoseFrame;
use thiserror::Error;

/// Errors a pose source may report for one estimation call.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum SourceError {
    /// The model is not loaded or not ready to serve estimates
    #[error("Pose model not ready: {message}")]
    NotReady {
        /// Why the model is unavailable
        message: String,
    },

    /// The estimation call itself failed
    #[error("Pose estimation failed: {message}")]
    Estimation {
        /// Collaborator-reported failure description
        message: String,
    },
}

impl SourceError {
    /// Creates an estimation error with the given message.
    pub fn estimation(message: impl Into<String>) -> Self {
        Self::Estimation {
            message: message.into(),
        }
    }
}

/// Provider of per-frame pose estimates.
///
/// One call per detection cycle against the most recent camera frame.
/// `Ok(None)` means no person was detected; `Err` means the collaborator
/// faulted this cycle. The engine treats both as "nothing to count" and
/// keeps polling -- a slow or hung call simply delays the next cycle,
/// which is bounded by the single-task loop rather than a hard timeout.
#[async_trait]
pub trait PoseSource: Send + Sync {
    /// Estimates the pose in the most recent frame.
    async fn next_pose(&self) -> Result<Option<PoseFrame>, SourceError>;
}
