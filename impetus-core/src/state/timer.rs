//! Countdown counters shared by the interpreter and the countdown engine

use super::machine::RunState;

/// All mutable timer state
///
/// One instance lives in the controller for the lifetime of the firmware.
/// Invariant: `current_seconds <= total_seconds`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerState {
    run_state: RunState,
    /// Duration of the current phase
    total_seconds: u32,
    /// Seconds left in the current phase
    current_seconds: u32,
    /// Last value pushed to the face, `None` before the first render
    last_rendered_seconds: Option<u32>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    /// Stopped, zero duration, nothing rendered yet
    pub const fn new() -> Self {
        Self {
            run_state: RunState::Stopped,
            total_seconds: 0,
            current_seconds: 0,
            last_rendered_seconds: None,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn current_seconds(&self) -> u32 {
        self.current_seconds
    }

    pub fn last_rendered_seconds(&self) -> Option<u32> {
        self.last_rendered_seconds
    }

    /// True when the face does not show `current_seconds`
    pub fn needs_render(&self) -> bool {
        self.last_rendered_seconds != Some(self.current_seconds)
    }

    pub(crate) fn set_run_state(&mut self, state: RunState) {
        self.run_state = state;
    }

    /// Load a new phase duration; the countdown restarts from the top
    pub(crate) fn set_duration(&mut self, seconds: u32) {
        self.total_seconds = seconds;
        self.current_seconds = seconds;
    }

    /// Hold the display at the full duration
    pub(crate) fn reset_to_total(&mut self) {
        self.current_seconds = self.total_seconds;
    }

    /// Count one second down, returns the seconds left
    pub(crate) fn count_down(&mut self) -> u32 {
        self.current_seconds = self.current_seconds.saturating_sub(1);
        self.current_seconds
    }

    pub(crate) fn mark_rendered(&mut self) {
        self.last_rendered_seconds = Some(self.current_seconds);
    }

    /// Forget what the face shows so the next render goes through
    pub(crate) fn invalidate_render(&mut self) {
        self.last_rendered_seconds = None;
    }
}
