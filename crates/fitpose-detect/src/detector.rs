//! The detector abstraction and its configuration.

use fitpose_core::{CoreError, CoreResult, ExerciseType, PoseFrame};

use crate::pullup::PullUpDetector;
use crate::pushup::PushUpDetector;
use crate::situp::SitUpDetector;
use crate::state::DetectorState;

/// Configuration shared by all exercise detectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Keypoint score a joint must strictly exceed to be considered visible
    pub visibility_threshold: f32,
    /// Consecutive confirming frames required before a debounced state
    /// transition is committed (push-ups only)
    pub required_frames: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.3,
            required_frames: 3,
        }
    }
}

impl DetectorConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the threshold is outside [0, 1]
    /// or the debounce window is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(CoreError::configuration(format!(
                "visibility_threshold must be in [0.0, 1.0], got {}",
                self.visibility_threshold
            )));
        }
        if self.required_frames == 0 {
            return Err(CoreError::configuration(
                "required_frames must be at least 1",
            ));
        }
        Ok(())
    }
}

/// A per-exercise repetition state machine.
///
/// Implementations consume one frame at a time in arrival order and own
/// their hysteresis state exclusively. Frames whose required keypoints
/// fall at or below the visibility threshold must leave state and count
/// untouched.
pub trait ExerciseDetector: Send {
    /// Processes one frame. Returns `true` exactly when a full
    /// down-to-up repetition cycle completes on this frame.
    fn update(&mut self, frame: &PoseFrame) -> bool;

    /// Clears all hysteresis state.
    fn reset(&mut self);

    /// The exercise this detector counts.
    fn exercise(&self) -> ExerciseType;

    /// Read-only view of the hysteresis state.
    fn state(&self) -> &DetectorState;
}

/// Builds the detector for the given exercise.
///
/// # Errors
///
/// Returns a configuration error if `config` is invalid.
pub fn for_exercise(
    exercise: ExerciseType,
    config: DetectorConfig,
) -> CoreResult<Box<dyn ExerciseDetector>> {
    config.validate()?;
    Ok(match exercise {
        ExerciseType::PushUps => Box::new(PushUpDetector::new(config)),
        ExerciseType::SitUps => Box::new(SitUpDetector::new(config)),
        ExerciseType::PullUps => Box::new(PullUpDetector::new(config)),
    })
}
