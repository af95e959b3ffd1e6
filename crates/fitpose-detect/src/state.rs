//! Hysteresis state shared by all exercise detectors.

/// Per-detector down/up hysteresis state.
///
/// Owned exclusively by one detector instance and mutated only by that
/// detector's per-frame update. Invariant: `up_confirmed` can only become
/// true after `down_confirmed` was true in a strictly earlier update --
/// a repetition requires a down phase before an up phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectorState {
    /// Whether the down position has been confirmed for the current cycle
    pub down_confirmed: bool,
    /// Whether the up position has been confirmed for the current cycle
    pub up_confirmed: bool,
    /// Consecutive usable frames satisfying the down predicate
    pub consecutive_down: u32,
    /// Consecutive usable frames satisfying the up predicate
    pub consecutive_up: u32,
}

impl DetectorState {
    /// Creates a fresh, all-clear state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all flags and counters.
    ///
    /// Called on explicit counter reset and on exercise-type change; a
    /// previously confirmed down position never survives either.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
