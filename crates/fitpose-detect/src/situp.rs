//! Sit-up repetition detection from nose-versus-hip vertical ordering.
//!
//! In image coordinates Y grows downward, so a torso lying flat puts the
//! nose *below* the hip midline (numerically greater Y) and a completed
//! sit-up brings the nose above it.
//!
//! Unlike the push-up detector, this state machine is edge-triggered: a
//! single usable frame on either side of the hip midline commits the
//! transition, with no multi-frame debounce. That asymmetry is inherited
//! from the reference counter and is preserved deliberately; the counting
//! tests flag it by name rather than papering over it.

use fitpose_core::geometry::midpoint_y;
use fitpose_core::{ExerciseType, KeypointType, PoseFrame};

use crate::detector::{DetectorConfig, ExerciseDetector};
use crate::state::DetectorState;

const REQUIRED_KEYPOINTS: [KeypointType; 3] = [
    KeypointType::Nose,
    KeypointType::LeftHip,
    KeypointType::RightHip,
];

/// Edge-triggered sit-up detector.
#[derive(Debug)]
pub struct SitUpDetector {
    config: DetectorConfig,
    state: DetectorState,
}

impl SitUpDetector {
    /// Creates a new sit-up detector.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            state: DetectorState::new(),
        }
    }
}

impl ExerciseDetector for SitUpDetector {
    fn update(&mut self, frame: &PoseFrame) -> bool {
        let visible = REQUIRED_KEYPOINTS
            .iter()
            .all(|&t| frame.keypoint(t).is_visible(self.config.visibility_threshold));
        if !visible {
            return false;
        }

        let nose_y = frame.keypoint(KeypointType::Nose).y;
        let hip_y = midpoint_y(
            frame.keypoint(KeypointType::LeftHip),
            frame.keypoint(KeypointType::RightHip),
        );

        let is_down = nose_y > hip_y;
        let is_up = nose_y < hip_y;

        if is_down && !self.state.down_confirmed {
            self.state.down_confirmed = true;
        } else if is_up && self.state.down_confirmed && !self.state.up_confirmed {
            self.state.up_confirmed = true;
            return true;
        } else if !is_up && self.state.up_confirmed {
            // Back past the midline: ready for the next cycle
            self.state.up_confirmed = false;
            self.state.down_confirmed = false;
        }

        false
    }

    fn reset(&mut self) {
        self.state.clear();
    }

    fn exercise(&self) -> ExerciseType {
        ExerciseType::SitUps
    }

    fn state(&self) -> &DetectorState {
        &self.state
    }
}
