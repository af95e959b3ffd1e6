//! Pull-up repetition detection from wrist-versus-shoulder vertical ordering.
//!
//! The down position (arms extended) is a wrist midpoint numerically
//! greater than the shoulder midpoint in image coordinates, the up
//! position (chin-level pull) the reverse.
//!
//! Edge-triggered like the sit-up detector; see [`crate::situp`] for the
//! debounce asymmetry note.

use fitpose_core::geometry::midpoint_y;
use fitpose_core::{ExerciseType, KeypointType, PoseFrame};

use crate::detector::{DetectorConfig, ExerciseDetector};
use crate::state::DetectorState;

const REQUIRED_KEYPOINTS: [KeypointType; 4] = [
    KeypointType::LeftShoulder,
    KeypointType::RightShoulder,
    KeypointType::LeftWrist,
    KeypointType::RightWrist,
];

/// Edge-triggered pull-up detector.
#[derive(Debug)]
pub struct PullUpDetector {
    config: DetectorConfig,
    state: DetectorState,
}

impl PullUpDetector {
    /// Creates a new pull-up detector.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            state: DetectorState::new(),
        }
    }
}

impl ExerciseDetector for PullUpDetector {
    fn update(&mut self, frame: &PoseFrame) -> bool {
        let visible = REQUIRED_KEYPOINTS
            .iter()
            .all(|&t| frame.keypoint(t).is_visible(self.config.visibility_threshold));
        if !visible {
            return false;
        }

        let shoulder_y = midpoint_y(
            frame.keypoint(KeypointType::LeftShoulder),
            frame.keypoint(KeypointType::RightShoulder),
        );
        let wrist_y = midpoint_y(
            frame.keypoint(KeypointType::LeftWrist),
            frame.keypoint(KeypointType::RightWrist),
        );

        let is_down = wrist_y > shoulder_y;
        let is_up = wrist_y < shoulder_y;

        if is_down && !self.state.down_confirmed {
            self.state.down_confirmed = true;
        } else if is_up && self.state.down_confirmed && !self.state.up_confirmed {
            self.state.up_confirmed = true;
            return true;
        } else if !is_up && self.state.up_confirmed {
            self.state.up_confirmed = false;
            self.state.down_confirmed = false;
        }

        false
    }

    fn reset(&mut self) {
        self.state.clear();
    }

    fn exercise(&self) -> ExerciseType {
        ExerciseType::PullUps
    }

    fn state(&self) -> &DetectorState {
        &self.state
    }
}
