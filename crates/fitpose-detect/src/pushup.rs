//! Push-up repetition detection from elbow angles.
//!
//! A push-up frame is classified by the interior elbow angle
//! (shoulder-elbow-wrist) on both arms: below 95 degrees on both sides is
//! a down frame, above 160 degrees on both sides is an up frame. Raw
//! per-frame classifications are noisy, so every transition is debounced:
//! the same classification must hold for `required_frames` consecutive
//! usable frames before the state machine commits it, and any transitional
//! frame (neither down nor up) zeroes both consecutive counters, so no
//! partial credit carries across an ambiguous frame.

use fitpose_core::geometry::joint_angle;
use fitpose_core::{ExerciseType, KeypointType, PoseFrame};

use crate::detector::{DetectorConfig, ExerciseDetector};
use crate::state::DetectorState;

/// Elbow angle below which both arms count as bent (down position).
pub const DOWN_THRESHOLD_DEG: f32 = 95.0;

/// Elbow angle above which both arms count as extended (up position).
pub const UP_THRESHOLD_DEG: f32 = 160.0;

const REQUIRED_KEYPOINTS: [KeypointType; 6] = [
    KeypointType::LeftShoulder,
    KeypointType::RightShoulder,
    KeypointType::LeftElbow,
    KeypointType::RightElbow,
    KeypointType::LeftWrist,
    KeypointType::RightWrist,
];

/// Debounced push-up detector.
#[derive(Debug)]
pub struct PushUpDetector {
    config: DetectorConfig,
    state: DetectorState,
}

impl PushUpDetector {
    /// Creates a new push-up detector.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            state: DetectorState::new(),
        }
    }

    fn elbow_angles(&self, frame: &PoseFrame) -> Option<(f32, f32)> {
        let left = joint_angle(
            frame.keypoint(KeypointType::LeftShoulder),
            frame.keypoint(KeypointType::LeftElbow),
            frame.keypoint(KeypointType::LeftWrist),
        )?;
        let right = joint_angle(
            frame.keypoint(KeypointType::RightShoulder),
            frame.keypoint(KeypointType::RightElbow),
            frame.keypoint(KeypointType::RightWrist),
        )?;
        Some((left, right))
    }
}

impl ExerciseDetector for PushUpDetector {
    fn update(&mut self, frame: &PoseFrame) -> bool {
        let visible = REQUIRED_KEYPOINTS
            .iter()
            .all(|&t| frame.keypoint(t).is_visible(self.config.visibility_threshold));
        if !visible {
            return false;
        }

        let Some((left, right)) = self.elbow_angles(frame) else {
            return false;
        };

        let is_down = left < DOWN_THRESHOLD_DEG && right < DOWN_THRESHOLD_DEG;
        let is_up = left > UP_THRESHOLD_DEG && right > UP_THRESHOLD_DEG;

        if is_down {
            self.state.consecutive_down += 1;
            self.state.consecutive_up = 0;
            if self.state.consecutive_down >= self.config.required_frames {
                self.state.down_confirmed = true;
                self.state.up_confirmed = false;
            }
        } else if is_up {
            self.state.consecutive_up += 1;
            if self.state.down_confirmed
                && self.state.consecutive_up >= self.config.required_frames
                && !self.state.up_confirmed
            {
                self.state.up_confirmed = true;
                self.state.consecutive_down = 0;
                self.state.consecutive_up = 0;
                return true;
            }
        } else {
            // Transitional frame: no partial credit
            self.state.consecutive_down = 0;
            self.state.consecutive_up = 0;
        }

        false
    }

    fn reset(&mut self) {
        self.state.clear();
    }

    fn exercise(&self) -> ExerciseType {
        ExerciseType::PushUps
    }

    fn state(&self) -> &DetectorState {
        &self.state
    }
}
