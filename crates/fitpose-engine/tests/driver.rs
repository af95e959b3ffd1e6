//! Detection loop driver tests with a scripted pose source.
//!
//! The source replays a fixed sequence of estimation outcomes; the tests
//! drive cycles through `step()` for determinism and use tokio's paused
//! clock for the throttle behavior.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use fitpose_core::{Confidence, ExerciseType, Keypoint, KeypointType, PoseFrame};
use fitpose_engine::{DetectionEngine, EngineConfig, PoseSource, SourceError};

/// Pose source that replays a scripted sequence of outcomes, then
/// reports "no person" forever.
struct ScriptedSource {
    script: Mutex<VecDeque<Result<Option<PoseFrame>, SourceError>>>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<Option<PoseFrame>, SourceError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
        })
    }
}

#[async_trait]
impl PoseSource for ScriptedSource {
    async fn next_pose(&self) -> Result<Option<PoseFrame>, SourceError> {
        self.script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

/// Sit-up frame with the nose at `nose_y` and hips at 0.6.
fn situp_frame(nose_y: f32) -> PoseFrame {
    let score = Confidence::new(0.9).unwrap();
    let keypoints: Vec<Keypoint> = KeypointType::ALL
        .iter()
        .map(|&t| match t {
            KeypointType::Nose => Keypoint::new(t, 0.5, nose_y, score),
            KeypointType::LeftHip | KeypointType::RightHip => Keypoint::new(t, 0.5, 0.6, score),
            _ => Keypoint::new(t, 0.5, 0.5, score),
        })
        .collect();
    PoseFrame::from_keypoints(&keypoints).unwrap()
}

fn situp_config() -> EngineConfig {
    EngineConfig {
        exercise: ExerciseType::SitUps,
        ..EngineConfig::default()
    }
}

#[tokio::test]
async fn counts_reps_across_cycles() {
    let source = ScriptedSource::new(vec![
        Ok(Some(situp_frame(0.8))), // down
        Ok(Some(situp_frame(0.4))), // up -> rep 1
        Ok(Some(situp_frame(0.8))), // back down: clears the cycle flags
        Ok(Some(situp_frame(0.8))), // still down: re-arms the down phase
        Ok(Some(situp_frame(0.4))), // up -> rep 2
    ]);
    let mut engine = DetectionEngine::new(situp_config(), source).unwrap();

    for _ in 0..5 {
        engine.step().await;
    }
    assert_eq!(engine.current_count(), 2);
}

#[tokio::test]
async fn source_fault_is_a_quiet_cycle() {
    let source = ScriptedSource::new(vec![
        Ok(Some(situp_frame(0.8))),
        Err(SourceError::estimation("backend lost")),
        Ok(Some(situp_frame(0.4))),
    ]);
    let mut engine = DetectionEngine::new(situp_config(), source).unwrap();

    engine.step().await;
    engine.step().await; // faulting cycle: no state change, no panic
    assert_eq!(engine.current_count(), 0);
    engine.step().await;
    assert_eq!(engine.current_count(), 1);
}

#[tokio::test]
async fn counting_disabled_still_reports_presence() {
    let source = ScriptedSource::new(vec![
        Ok(Some(situp_frame(0.8))),
        Ok(Some(situp_frame(0.4))),
    ]);
    let config = EngineConfig {
        counting_enabled: false,
        ..situp_config()
    };
    let mut engine = DetectionEngine::new(config, source).unwrap();
    let mut results = engine.subscribe();

    engine.step().await;
    let result = results.try_recv().unwrap();
    assert!(result.human_detected);
    assert!(result.confidence > 0.8);
    assert_eq!(result.rep_count, 0);

    engine.step().await;
    assert_eq!(engine.current_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn emissions_are_throttled_to_the_interval() {
    let frames: Vec<_> = (0..4).map(|_| Ok(Some(situp_frame(0.8)))).collect();
    let source = ScriptedSource::new(frames);
    let mut engine = DetectionEngine::new(situp_config(), source).unwrap();
    let mut results = engine.subscribe();

    engine.step().await;
    assert!(results.try_recv().is_ok());

    // Second cycle lands inside the 100 ms window: suppressed
    engine.step().await;
    assert!(results.try_recv().is_err());

    tokio::time::advance(Duration::from_millis(101)).await;
    engine.step().await;
    assert!(results.try_recv().is_ok());
}

#[tokio::test]
async fn stopped_engine_discards_late_results() {
    let source = ScriptedSource::new(vec![
        Ok(Some(situp_frame(0.8))),
        Ok(Some(situp_frame(0.4))),
    ]);
    let mut engine = DetectionEngine::new(situp_config(), source).unwrap();
    let mut results = engine.subscribe();

    engine.step().await;
    assert_eq!(results.try_recv().unwrap().rep_count, 0);

    engine.stop();
    assert!(!engine.is_active());

    // The up frame arrives after stop: it must not count or emit
    engine.step().await;
    assert_eq!(engine.current_count(), 0);
    assert!(results.try_recv().is_err());
}

#[tokio::test]
async fn handle_stops_the_run_loop() {
    let source = ScriptedSource::new(vec![]);
    let mut engine = DetectionEngine::new(situp_config(), source).unwrap();
    let handle = engine.handle();

    let stopper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stop();
    });

    engine.run().await; // returns once the handle fires
    assert!(!engine.is_active());
    stopper.await.unwrap();
}

#[tokio::test]
async fn switching_exercise_resets_mid_stream() {
    let source = ScriptedSource::new(vec![
        Ok(Some(situp_frame(0.8))), // confirms sit-up down
        Ok(Some(situp_frame(0.4))), // processed as pull-up frame post-switch
    ]);
    let mut engine = DetectionEngine::new(situp_config(), source).unwrap();

    engine.step().await;
    engine.set_exercise(ExerciseType::PullUps).unwrap();

    engine.step().await;
    assert_eq!(engine.current_count(), 0);
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    let source = ScriptedSource::new(vec![]);
    let config = EngineConfig {
        detection_threshold: 2.0,
        ..EngineConfig::default()
    };
    assert!(DetectionEngine::new(config, source).is_err());
}
