//! Detection engine configuration.

use std::time::Duration;

use fitpose_core::{CoreError, CoreResult, ExerciseType};
use fitpose_detect::DetectorConfig;

/// Configuration for the detection engine.
///
/// The reference implementation used two different confidence cutoffs
/// (0.3 for keypoint visibility, 0.5 for person detection); they are
/// unified here on a single `detection_threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// The exercise to count
    pub exercise: ExerciseType,
    /// Confidence a keypoint must strictly exceed to be usable
    pub detection_threshold: f32,
    /// When false, frames are still classified for human presence but
    /// no counting logic runs
    pub counting_enabled: bool,
    /// Consecutive confirming frames for debounced transitions
    pub required_frames: u32,
    /// How often the loop pulls a frame from the pose source
    pub poll_interval: Duration,
    /// Minimum spacing between successive result emissions
    pub emit_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exercise: ExerciseType::PushUps,
            detection_threshold: 0.3,
            counting_enabled: true,
            required_frames: 3,
            // ~30 fps polling, 10 Hz emission
            poll_interval: Duration::from_millis(33),
            emit_interval: Duration::from_millis(100),
        }
    }
}

impl EngineConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for out-of-range thresholds or
    /// zero intervals.
    pub fn validate(&self) -> CoreResult<()> {
        self.detector_config().validate()?;
        if self.poll_interval.is_zero() {
            return Err(CoreError::configuration("poll_interval must be non-zero"));
        }
        if self.emit_interval.is_zero() {
            return Err(CoreError::configuration("emit_interval must be non-zero"));
        }
        Ok(())
    }

    /// The detector-level configuration slice of this config.
    #[must_use]
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            visibility_threshold: self.detection_threshold,
            required_frames: self.required_frames,
        }
    }
}
