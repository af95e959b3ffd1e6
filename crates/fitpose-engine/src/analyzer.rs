//! Offline analysis of recorded keypoint sequences.
//!
//! After a recording is uploaded, the stored pose stream is replayed
//! through the same detectors the live loop uses, plus posture scoring
//! that the live path skips: per-frame joint angles are compared against
//! per-exercise target ranges and averaged into a 0-100 score.

use std::time::Duration;

use fitpose_core::geometry::joint_angle;
use fitpose_core::{CoreError, ExerciseType, KeypointType, PoseFrame};
use fitpose_detect::{DetectorConfig, RepCounter};

use crate::error::EngineResult;

/// Elbow angle that never being reached marks a shallow push-up.
const PUSHUP_DEPTH_DEG: f32 = 120.0;

/// Configuration for offline analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerConfig {
    /// Detector configuration (thresholds, debounce window)
    pub detector: DetectorConfig,
    /// Rate at which the recording was sampled, used for the duration
    pub frame_rate_hz: f32,
    /// Minimum visible keypoints for a frame to enter the analysis
    pub min_visible_keypoints: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            frame_rate_hz: 10.0,
            min_visible_keypoints: 6,
        }
    }
}

/// Summary of one analyzed recording.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoAnalysis {
    /// The exercise that was analyzed
    pub exercise: ExerciseType,
    /// Total repetitions counted
    pub total_reps: u32,
    /// Mean of per-frame peak keypoint confidence over analyzed frames
    pub avg_confidence: f32,
    /// Posture quality, 0-100
    pub posture_score: u8,
    /// Frames that passed the visibility gate
    pub frames_analyzed: usize,
    /// Recording length implied by the frame rate
    pub duration: Duration,
    /// Coaching feedback derived from the joint angles
    pub notes: Vec<String>,
}

/// Analyzes a recorded pose sequence.
///
/// Frames with fewer than `min_visible_keypoints` visible joints are
/// skipped entirely, matching the live loop's treatment of low-visibility
/// frames.
///
/// # Errors
///
/// Returns a configuration error if the analyzer config is invalid.
pub fn analyze_frames(
    frames: &[PoseFrame],
    exercise: ExerciseType,
    config: AnalyzerConfig,
) -> EngineResult<VideoAnalysis> {
    if config.frame_rate_hz <= 0.0 {
        return Err(CoreError::configuration("frame_rate_hz must be positive").into());
    }
    let mut counter = RepCounter::new(exercise, config.detector)?;

    let threshold = config.detector.visibility_threshold;
    let mut confidence_accum = 0.0_f32;
    let mut posture_accum = 0.0_f32;
    let mut frames_analyzed = 0_usize;
    let mut min_elbow_angle = f32::INFINITY;

    for frame in frames {
        if frame.visible_count(threshold) < config.min_visible_keypoints {
            continue;
        }
        frames_analyzed += 1;
        confidence_accum += frame.max_score().value();
        posture_accum += posture_sample(frame, exercise);

        if let Some(angle) = min_side_angle(
            frame,
            KeypointType::LeftShoulder,
            KeypointType::LeftElbow,
            KeypointType::LeftWrist,
            KeypointType::RightShoulder,
            KeypointType::RightElbow,
            KeypointType::RightWrist,
        ) {
            min_elbow_angle = min_elbow_angle.min(angle);
        }

        counter.process(frame);
    }

    let mut notes = Vec::new();
    if exercise == ExerciseType::PushUps
        && frames_analyzed > 0
        && min_elbow_angle > PUSHUP_DEPTH_DEG
    {
        notes.push("Shallow range of motion: bend the elbows further on the way down".to_string());
    }

    let avg_confidence = if frames_analyzed > 0 {
        confidence_accum / frames_analyzed as f32
    } else {
        0.0
    };
    let posture_score = if frames_analyzed > 0 {
        (100.0 * (posture_accum / frames_analyzed as f32).clamp(0.0, 1.0)).round() as u8
    } else {
        0
    };
    let duration = Duration::from_secs_f32(frames.len() as f32 / config.frame_rate_hz);

    Ok(VideoAnalysis {
        exercise,
        total_reps: counter.count(),
        avg_confidence,
        posture_score,
        frames_analyzed,
        duration,
        notes,
    })
}

/// Closeness of `angle` to `target`, linear within `tolerance` degrees.
fn score_angle(angle: Option<f32>, target: f32, tolerance: f32) -> f32 {
    match angle {
        Some(angle) => (1.0 - (angle - target).abs() / tolerance).max(0.0),
        None => 0.0,
    }
}

fn side_angle(frame: &PoseFrame, a: KeypointType, b: KeypointType, c: KeypointType) -> Option<f32> {
    joint_angle(frame.keypoint(a), frame.keypoint(b), frame.keypoint(c))
}

#[allow(clippy::too_many_arguments)]
fn min_side_angle(
    frame: &PoseFrame,
    la: KeypointType,
    lb: KeypointType,
    lc: KeypointType,
    ra: KeypointType,
    rb: KeypointType,
    rc: KeypointType,
) -> Option<f32> {
    match (side_angle(frame, la, lb, lc), side_angle(frame, ra, rb, rc)) {
        (Some(l), Some(r)) => Some(l.min(r)),
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}

/// Per-frame posture sample in [0, 1] for the given exercise.
fn posture_sample(frame: &PoseFrame, exercise: ExerciseType) -> f32 {
    match exercise {
        // Push-ups: arms should pass through full extension
        ExerciseType::PushUps => {
            let left = side_angle(
                frame,
                KeypointType::LeftShoulder,
                KeypointType::LeftElbow,
                KeypointType::LeftWrist,
            );
            let right = side_angle(
                frame,
                KeypointType::RightShoulder,
                KeypointType::RightElbow,
                KeypointType::RightWrist,
            );
            (score_angle(left, 180.0, 60.0) + score_angle(right, 180.0, 60.0)) / 2.0
        }
        // Sit-ups: knees should stay bent near a right angle
        ExerciseType::SitUps => {
            let left = side_angle(
                frame,
                KeypointType::LeftHip,
                KeypointType::LeftKnee,
                KeypointType::LeftAnkle,
            );
            let right = side_angle(
                frame,
                KeypointType::RightHip,
                KeypointType::RightKnee,
                KeypointType::RightAnkle,
            );
            (score_angle(left, 90.0, 60.0) + score_angle(right, 90.0, 60.0)) / 2.0
        }
        // Pull-ups: elbows should reach a tight bend at the top
        ExerciseType::PullUps => {
            let left = side_angle(
                frame,
                KeypointType::LeftShoulder,
                KeypointType::LeftElbow,
                KeypointType::LeftWrist,
            );
            let right = side_angle(
                frame,
                KeypointType::RightShoulder,
                KeypointType::RightElbow,
                KeypointType::RightWrist,
            );
            (score_angle(left, 90.0, 60.0) + score_angle(right, 90.0, 60.0)) / 2.0
        }
    }
}
