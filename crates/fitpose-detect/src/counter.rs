//! The rep counter/aggregator.
//!
//! [`RepCounter`] owns exactly one detector and the monotonic repetition
//! count, and is the only place the count is incremented. The hosting
//! screen resets it when a fresh recording starts; switching exercise
//! mid-session swaps the detector and performs the same full reset so no
//! stale down/up flags leak across exercises.

use chrono::{DateTime, Utc};
use fitpose_core::{CoreResult, ExerciseType, PoseFrame};

use crate::detector::{for_exercise, DetectorConfig, ExerciseDetector};
use crate::state::DetectorState;

/// A completed-repetition transition event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepEvent {
    /// The exercise the rep belongs to
    pub exercise: ExerciseType,
    /// The count after this rep
    pub count: u32,
    /// When the rep completed
    pub timestamp: DateTime<Utc>,
}

/// Aggregates detector transitions into a monotonic repetition count.
pub struct RepCounter {
    detector: Box<dyn ExerciseDetector>,
    config: DetectorConfig,
    count: u32,
}

impl RepCounter {
    /// Creates a counter for the given exercise.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid.
    pub fn new(exercise: ExerciseType, config: DetectorConfig) -> CoreResult<Self> {
        Ok(Self {
            detector: for_exercise(exercise, config)?,
            config,
            count: 0,
        })
    }

    /// Processes one frame, returning the transition event if this frame
    /// completed a repetition.
    pub fn process(&mut self, frame: &PoseFrame) -> Option<RepEvent> {
        if !self.detector.update(frame) {
            return None;
        }
        self.count += 1;
        tracing::debug!(
            exercise = %self.detector.exercise(),
            count = self.count,
            "Repetition completed"
        );
        Some(RepEvent {
            exercise: self.detector.exercise(),
            count: self.count,
            timestamp: Utc::now(),
        })
    }

    /// The current repetition count.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The exercise currently being counted.
    #[must_use]
    pub fn exercise(&self) -> ExerciseType {
        self.detector.exercise()
    }

    /// Read-only view of the detector's hysteresis state.
    #[must_use]
    pub fn detector_state(&self) -> &DetectorState {
        self.detector.state()
    }

    /// Clears the count and all detector state.
    pub fn reset(&mut self) {
        self.count = 0;
        self.detector.reset();
    }

    /// Switches to a different exercise.
    ///
    /// Discards the previous detector's hysteresis state and zeroes the
    /// count; a confirmed down position never carries across exercises.
    ///
    /// # Errors
    ///
    /// Propagates configuration validation from detector construction.
    pub fn set_exercise(&mut self, exercise: ExerciseType) -> CoreResult<()> {
        if exercise != self.detector.exercise() {
            self.detector = for_exercise(exercise, self.config)?;
        } else {
            self.detector.reset();
        }
        self.count = 0;
        Ok(())
    }
}

impl std::fmt::Debug for RepCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepCounter")
            .field("exercise", &self.detector.exercise())
            .field("count", &self.count)
            .field("state", self.detector.state())
            .finish()
    }
}
