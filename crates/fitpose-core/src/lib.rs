//! # FitPose Core
//!
//! Core types and utilities for the FitPose exercise-repetition counting
//! system.
//!
//! This crate provides the foundational building blocks shared by the
//! detector and engine crates:
//!
//! - **Pose Types**: [`PoseFrame`], [`Keypoint`], [`KeypointType`] for
//!   representing one instant of a pose-keypoint stream in the 17-point
//!   COCO layout produced by single-person keypoint models.
//!
//! - **Domain Types**: [`ExerciseType`], [`DetectionResult`], [`SessionId`]
//!   for the exercise-counting domain.
//!
//! - **Error Types**: [`CoreError`] and [`CoreResult`] via the [`error`]
//!   module.
//!
//! - **Geometry**: joint-angle computation in the [`geometry`] module.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization via serde
//!
//! ## Example
//!
//! ```rust
//! use fitpose_core::{Confidence, Keypoint, KeypointType};
//!
//! let keypoint = Keypoint::new(
//!     KeypointType::LeftElbow,
//!     0.4,
//!     0.6,
//!     Confidence::new(0.92).unwrap(),
//! );
//!
//! assert!(keypoint.is_visible(0.3));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{
    Confidence, DetectionResult, ExerciseType, Keypoint, KeypointType, PoseFrame, SessionId,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of keypoints in a pose frame (COCO layout)
pub const KEYPOINT_COUNT: usize = 17;

/// Default confidence threshold for keypoint visibility
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.3;
