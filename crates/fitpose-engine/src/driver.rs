//! The detection loop driver.
//!
//! One engine instance drives one exercise session: it polls the pose
//! source at the configured cadence, forwards frames to the rep counter,
//! and broadcasts [`DetectionResult`] snapshots to subscribers at most
//! once per throttle interval.
//!
//! # Concurrency model
//!
//! The loop is a single task; each cycle fully completes (including the
//! await on the pose source) before the next begins, so hysteresis state
//! needs no locking. Missed poll ticks are skipped, never queued. After
//! [`stop`](DetectionEngine::stop), a late result from an in-flight
//! estimation call is discarded before it can mutate state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio::time::{Instant, MissedTickBehavior};

use fitpose_core::{DetectionResult, ExerciseType, PoseFrame, SessionId};
use fitpose_detect::RepCounter;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::source::PoseSource;

/// Capacity of the result broadcast channel. Slow subscribers lag and
/// lose the oldest snapshots rather than applying backpressure.
const RESULT_CHANNEL_CAPACITY: usize = 32;

/// Shared handle for stopping a running engine from another task.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    active: Arc<AtomicBool>,
}

impl EngineHandle {
    /// Requests the detection loop to stop after the current cycle.
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Whether the engine is still accepting results.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Drives detection cycles for one exercise session.
pub struct DetectionEngine {
    config: EngineConfig,
    session: SessionId,
    counter: RepCounter,
    source: Arc<dyn PoseSource>,
    results_tx: broadcast::Sender<DetectionResult>,
    active: Arc<AtomicBool>,
    last_emit: Option<Instant>,
}

impl DetectionEngine {
    /// Creates an engine for the given configuration and pose source.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid configuration; there is no silent
    /// no-counting fallback.
    pub fn new(config: EngineConfig, source: Arc<dyn PoseSource>) -> EngineResult<Self> {
        config.validate()?;
        let counter = RepCounter::new(config.exercise, config.detector_config())?;
        let (results_tx, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);
        Ok(Self {
            config,
            session: SessionId::new(),
            counter,
            source,
            results_tx,
            active: Arc::new(AtomicBool::new(true)),
            last_emit: None,
        })
    }

    /// The session this engine instance belongs to.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Subscribes to throttled detection results.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DetectionResult> {
        self.results_tx.subscribe()
    }

    /// Returns a handle that can stop the loop from another task.
    #[must_use]
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            active: Arc::clone(&self.active),
        }
    }

    /// Runs detection cycles until [`stop`](Self::stop) is called.
    pub async fn run(&mut self) {
        let mut interval = tokio::time::interval(self.config.poll_interval);
        // An in-flight estimation call slower than the polling interval
        // skips the ticks it missed instead of queueing them.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            session = %self.session,
            exercise = %self.counter.exercise(),
            "Detection loop started"
        );

        while self.active.load(Ordering::SeqCst) {
            interval.tick().await;
            self.step().await;
        }

        tracing::info!(
            session = %self.session,
            reps = self.counter.count(),
            "Detection loop stopped"
        );
    }

    /// Executes one complete detection cycle.
    ///
    /// Exposed separately from [`run`](Self::run) so tests and
    /// frame-accurate callers can drive cycles deterministically.
    pub async fn step(&mut self) {
        let pose = match self.source.next_pose().await {
            Ok(pose) => pose,
            Err(e) => {
                // Collaborator fault: no detection this cycle, keep going
                tracing::warn!(session = %self.session, error = %e, "Pose source failed");
                None
            }
        };

        // The estimation call may have outlived a stop() request; a late
        // result must not mutate state or reach subscribers.
        if !self.active.load(Ordering::SeqCst) {
            return;
        }

        let (human_detected, confidence) = match &pose {
            Some(frame) => (true, frame.max_score().value()),
            None => (false, 0.0),
        };

        if self.config.counting_enabled {
            if let Some(frame) = &pose {
                if let Some(event) = self.counter.process(frame) {
                    tracing::info!(
                        session = %self.session,
                        exercise = %event.exercise,
                        count = event.count,
                        "Repetition counted"
                    );
                }
            }
        }

        self.maybe_emit(human_detected, pose, confidence);
    }

    /// Emits a snapshot if the throttle interval has elapsed.
    fn maybe_emit(&mut self, human_detected: bool, keypoints: Option<PoseFrame>, confidence: f32) {
        let now = Instant::now();
        if let Some(last) = self.last_emit {
            if now.duration_since(last) < self.config.emit_interval {
                return;
            }
        }
        self.last_emit = Some(now);

        let result = DetectionResult {
            human_detected,
            keypoints,
            confidence,
            rep_count: self.counter.count(),
            exercise: self.counter.exercise(),
            timestamp: Utc::now(),
        };
        // No subscribers is fine; the count is still queryable directly
        let _ = self.results_tx.send(result);
    }

    /// Requests the loop to stop; a cycle already in flight is discarded.
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Whether the engine is still accepting results.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// The current repetition count.
    #[must_use]
    pub fn current_count(&self) -> u32 {
        self.counter.count()
    }

    /// Clears the count and all detector state, e.g. when the user
    /// starts a fresh recording.
    pub fn reset(&mut self) {
        self.counter.reset();
        tracing::debug!(session = %self.session, "Counter reset");
    }

    /// Switches the exercise being counted, discarding all accumulated
    /// hysteresis state from the previous exercise.
    ///
    /// # Errors
    ///
    /// Propagates configuration validation from detector construction.
    pub fn set_exercise(&mut self, exercise: ExerciseType) -> EngineResult<()> {
        self.counter.set_exercise(exercise)?;
        tracing::info!(session = %self.session, exercise = %exercise, "Exercise switched");
        Ok(())
    }
}

impl std::fmt::Debug for DetectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionEngine")
            .field("session", &self.session)
            .field("exercise", &self.counter.exercise())
            .field("count", &self.counter.count())
            .field("active", &self.is_active())
            .finish()
    }
}
