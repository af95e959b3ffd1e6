//! # FitPose Detect
//!
//! Per-exercise repetition detectors and the rep counter/aggregator.
//!
//! Each supported exercise (push-ups, sit-ups, pull-ups) has its own
//! state machine implementing [`ExerciseDetector`]. A detector consumes
//! [`PoseFrame`](fitpose_core::PoseFrame)s one at a time, maintains its
//! down/up hysteresis state in an explicit [`DetectorState`], and reports
//! the instant a full down-to-up repetition cycle completes. The
//! [`RepCounter`] owns one detector plus the monotonic count and is the
//! only component that increments it.
//!
//! Counting behavior is intentionally uneven across exercises: push-ups
//! debounce every transition over three consecutive frames, while sit-ups
//! and pull-ups commit on a single frame edge. This mirrors the observed
//! behavior of the reference counter; see the module docs of [`situp`]
//! for details.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitpose_core::ExerciseType;
//! use fitpose_detect::{DetectorConfig, RepCounter};
//!
//! # fn frames() -> Vec<fitpose_core::PoseFrame> { vec![] }
//! let mut counter = RepCounter::new(ExerciseType::PushUps, DetectorConfig::default()).unwrap();
//! for frame in frames() {
//!     if let Some(event) = counter.process(&frame) {
//!         println!("rep {} completed", event.count);
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

pub mod counter;
pub mod detector;
pub mod pullup;
pub mod pushup;
pub mod situp;
pub mod state;

pub use counter::{RepCounter, RepEvent};
pub use detector::{for_exercise, DetectorConfig, ExerciseDetector};
pub use pullup::PullUpDetector;
pub use pushup::PushUpDetector;
pub use situp::SitUpDetector;
pub use state::DetectorState;
