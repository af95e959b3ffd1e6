//! # FitPose Engine
//!
//! The detection loop driver that turns a live pose-keypoint stream into
//! throttled [`DetectionResult`](fitpose_core::DetectionResult) emissions,
//! plus offline analysis of recorded keypoint sequences.
//!
//! The engine polls a [`PoseSource`] (the seam to the external
//! pose-estimation model) at a bounded cadence, forwards frames to the
//! active exercise detector, and broadcasts snapshots to subscribers at
//! most once per throttle interval. Frames are processed strictly in
//! arrival order on a single task; an in-flight estimation call delays
//! the next cycle rather than overlapping with it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitpose_core::ExerciseType;
//! use fitpose_engine::{DetectionEngine, EngineConfig, PoseSource};
//!
//! # async fn demo(source: Arc<dyn PoseSource>) -> fitpose_engine::EngineResult<()> {
//! let config = EngineConfig {
//!     exercise: ExerciseType::PushUps,
//!     ..EngineConfig::default()
//! };
//! let mut engine = DetectionEngine::new(config, source)?;
//! let mut results = engine.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(result) = results.recv().await {
//!         println!("reps: {}", result.rep_count);
//!     }
//! });
//!
//! engine.run().await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod analyzer;
pub mod config;
pub mod driver;
pub mod error;
pub mod source;

pub use analyzer::{analyze_frames, AnalyzerConfig, VideoAnalysis};
pub use config::EngineConfig;
pub use driver::{DetectionEngine, EngineHandle};
pub use error::{EngineError, EngineResult};
pub use source::{PoseSource, SourceError};
