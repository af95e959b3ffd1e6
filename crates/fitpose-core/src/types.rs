//! Core data types for the FitPose system.
//!
//! This module defines the data structures used throughout the FitPose
//! ecosystem for representing pose-keypoint frames and detection results.
//!
//! # Type Categories
//!
//! - **Pose Types**: [`PoseFrame`], [`Keypoint`], [`KeypointType`]
//! - **Domain Types**: [`ExerciseType`], [`DetectionResult`]
//! - **Common Types**: [`Confidence`], [`SessionId`]

use chrono::{DateTime, Utc};
use std::str::FromStr;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::KEYPOINT_COUNT;

// =============================================================================
// Common Types
// =============================================================================

/// Unique identifier for an exercise session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new unique session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Confidence score in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range [0.0, 1.0].
    pub fn new(value: f32) -> CoreResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::validation(format!(
                "Confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Creates a confidence value without validation (for internal use).
    ///
    /// # Safety
    ///
    /// The caller must ensure the value is in [0.0, 1.0].
    #[must_use]
    pub(crate) fn new_unchecked(value: f32) -> Self {
        debug_assert!((0.0..=1.0).contains(&value));
        Self(value)
    }

    /// Creates a confidence value, clamping out-of-range input into [0.0, 1.0].
    ///
    /// Keypoint models occasionally emit scores a hair outside the unit
    /// interval; this is the lenient constructor for that boundary.
    #[must_use]
    pub fn saturating(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns `true` if the confidence strictly exceeds the given threshold.
    #[must_use]
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.0 > threshold
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// Pose Types
// =============================================================================

/// Body joint in the 17-point COCO keypoint layout.
///
/// The discriminant values match the output index order of single-person
/// keypoint models (MoveNet and friends): 0 nose, 1/2 eyes, 3/4 ears,
/// 5/6 shoulders, 7/8 elbows, 9/10 wrists, 11/12 hips, 13/14 knees,
/// 15/16 ankles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum KeypointType {
    /// Nose (index 0)
    Nose = 0,
    /// Left eye (index 1)
    LeftEye = 1,
    /// Right eye (index 2)
    RightEye = 2,
    /// Left ear (index 3)
    LeftEar = 3,
    /// Right ear (index 4)
    RightEar = 4,
    /// Left shoulder (index 5)
    LeftShoulder = 5,
    /// Right shoulder (index 6)
    RightShoulder = 6,
    /// Left elbow (index 7)
    LeftElbow = 7,
    /// Right elbow (index 8)
    RightElbow = 8,
    /// Left wrist (index 9)
    LeftWrist = 9,
    /// Right wrist (index 10)
    RightWrist = 10,
    /// Left hip (index 11)
    LeftHip = 11,
    /// Right hip (index 12)
    RightHip = 12,
    /// Left knee (index 13)
    LeftKnee = 13,
    /// Right knee (index 14)
    RightKnee = 14,
    /// Left ankle (index 15)
    LeftAnkle = 15,
    /// Right ankle (index 16)
    RightAnkle = 16,
}

impl KeypointType {
    /// All keypoint types in model output order.
    pub const ALL: [Self; KEYPOINT_COUNT] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Returns the model output index of this keypoint.
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<u8> for KeypointType {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| CoreError::validation(format!("Keypoint index out of range: {value}")))
    }
}

/// A single body-joint observation from one frame of the pose stream.
///
/// Coordinates are in image space: `x` grows rightward, `y` grows
/// **downward**. Produced fresh every frame by the pose model; never
/// mutated by this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keypoint {
    /// Which body joint this observation belongs to
    pub keypoint_type: KeypointType,
    /// Horizontal position in image coordinates
    pub x: f32,
    /// Vertical position in image coordinates (grows downward)
    pub y: f32,
    /// Detection confidence for this joint
    pub score: Confidence,
}

impl Keypoint {
    /// Creates a new keypoint.
    #[must_use]
    pub fn new(keypoint_type: KeypointType, x: f32, y: f32, score: Confidence) -> Self {
        Self {
            keypoint_type,
            x,
            y,
            score,
        }
    }

    /// Returns `true` if this keypoint's score strictly exceeds `threshold`.
    #[must_use]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.score.exceeds(threshold)
    }
}

/// One instant of the pose stream: exactly 17 keypoints in COCO order.
///
/// A frame only exists when the model detected a person; "no person this
/// cycle" is represented by the absence of a frame (`Option<PoseFrame>`),
/// not by an empty frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoseFrame {
    keypoints: [Keypoint; KEYPOINT_COUNT],
}

impl PoseFrame {
    /// Creates a frame from a slice of keypoints in model output order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedFrame`] if the slice does not contain
    /// exactly 17 keypoints, and a validation error if the keypoints are
    /// not in canonical index order.
    pub fn from_keypoints(keypoints: &[Keypoint]) -> CoreResult<Self> {
        let array: [Keypoint; KEYPOINT_COUNT] =
            keypoints
                .try_into()
                .map_err(|_| CoreError::MalformedFrame {
                    expected: KEYPOINT_COUNT,
                    actual: keypoints.len(),
                })?;
        for (i, kp) in array.iter().enumerate() {
            if kp.keypoint_type.index() != i {
                return Err(CoreError::validation(format!(
                    "Keypoint at position {i} has type {:?}",
                    kp.keypoint_type
                )));
            }
        }
        Ok(Self { keypoints: array })
    }

    /// Returns the keypoint for the given joint.
    #[must_use]
    pub fn keypoint(&self, keypoint_type: KeypointType) -> &Keypoint {
        &self.keypoints[keypoint_type.index()]
    }

    /// Returns all keypoints in model output order.
    #[must_use]
    pub fn keypoints(&self) -> &[Keypoint; KEYPOINT_COUNT] {
        &self.keypoints
    }

    /// Returns the highest keypoint score in the frame.
    ///
    /// Used as the overall human-presence confidence of the frame.
    #[must_use]
    pub fn max_score(&self) -> Confidence {
        let max = self
            .keypoints
            .iter()
            .map(|kp| kp.score.value())
            .fold(0.0_f32, f32::max);
        Confidence::new_unchecked(max)
    }

    /// Returns how many keypoints are visible above `threshold`.
    #[must_use]
    pub fn visible_count(&self, threshold: f32) -> usize {
        self.keypoints
            .iter()
            .filter(|kp| kp.is_visible(threshold))
            .count()
    }
}

// =============================================================================
// Domain Types
// =============================================================================

/// Exercise disciplines supported by the rep counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseType {
    /// Push-ups, counted from elbow angles
    #[cfg_attr(feature = "serde", serde(rename = "pushups"))]
    PushUps,
    /// Sit-ups, counted from nose-versus-hip vertical ordering
    #[cfg_attr(feature = "serde", serde(rename = "situps"))]
    SitUps,
    /// Pull-ups, counted from wrist-versus-shoulder vertical ordering
    #[cfg_attr(feature = "serde", serde(rename = "pullups"))]
    PullUps,
}

impl ExerciseType {
    /// All supported exercises.
    pub const ALL: [Self; 3] = [Self::PushUps, Self::SitUps, Self::PullUps];

    /// Returns the canonical wire name of this exercise.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PushUps => "pushups",
            Self::SitUps => "situps",
            Self::PullUps => "pullups",
        }
    }
}

impl FromStr for ExerciseType {
    type Err = CoreError;

    /// Parses an exercise name, rejecting anything unrecognized.
    ///
    /// Unknown names are a configuration fault and fail loudly; there is
    /// no silent fallback exercise.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pushups" => Ok(Self::PushUps),
            "situps" => Ok(Self::SitUps),
            "pullups" => Ok(Self::PullUps),
            other => Err(CoreError::UnknownExercise {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot emitted to consumers once per throttle interval.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionResult {
    /// Whether a person was detected this cycle
    pub human_detected: bool,
    /// The pose frame, when a person was detected
    pub keypoints: Option<PoseFrame>,
    /// Overall detection confidence (highest keypoint score, 0 when absent)
    pub confidence: f32,
    /// Repetition count at emission time
    pub rep_count: u32,
    /// The exercise being counted
    pub exercise: ExerciseType,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}
