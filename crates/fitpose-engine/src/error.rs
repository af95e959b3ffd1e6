//! Error types for the detection engine.

use fitpose_core::CoreError;
use thiserror::Error;

use crate::source::SourceError;

/// A specialized `Result` type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors produced by the detection engine.
///
/// Pose-source faults never appear here: a failed estimation call is
/// logged and treated as "no detection this cycle", not propagated.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// Invalid configuration or malformed input
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A pose-source fault surfaced outside the detection loop
    /// (e.g. during offline analysis of a stored recording)
    #[error("Pose source error: {0}")]
    Source(#[from] SourceError),
}
