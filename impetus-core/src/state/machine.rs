//! Run-state machine
//!
//! ```text
//!            Started*/RemoteStarted
//!   Stopped ───────────────────────► Running
//!      ▲  ◄─────────────────────────   │  ▲
//!      │   Finished/RemoteStopped/     │  │ RemoteStarted
//!      │   timeout                     ▼  │
//!      └──────────────────────────── Paused
//!            Finished/RemoteStopped
//! ```

use super::events::Event;

/// Whether the countdown is ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Idle, display held at the full phase duration
    #[default]
    Stopped,
    /// Idle mid-phase, display held at the full phase duration
    Paused,
    /// Counting down once per second
    Running,
}

impl RunState {
    /// Check if the per-second tick decrements
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Check if the display is held at the full duration
    pub fn is_idle(&self) -> bool {
        !self.is_running()
    }

    /// Next state after a phone event
    ///
    /// Transitions are applied from any state: the phone decides and the
    /// watch follows. Label, duration and status events leave the state
    /// unchanged.
    pub fn transition(self, event: &Event) -> Self {
        match event {
            Event::StartedWork | Event::StartedRest | Event::RemoteStarted => RunState::Running,
            Event::RemotePaused => RunState::Paused,
            Event::Finished | Event::RemoteStopped => RunState::Stopped,
            Event::StatusPing
            | Event::PhaseLabelUpdate(_)
            | Event::RoundLabelUpdate(_)
            | Event::PresetLabelUpdate(_)
            | Event::DurationUpdate(_) => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impetus_protocol::Label;

    #[test]
    fn test_initial_state() {
        assert_eq!(RunState::default(), RunState::Stopped);
        assert!(RunState::default().is_idle());
    }

    #[test]
    fn test_start_from_stopped() {
        for event in [Event::StartedWork, Event::StartedRest, Event::RemoteStarted] {
            assert_eq!(RunState::Stopped.transition(&event), RunState::Running);
        }
    }

    #[test]
    fn test_pause_resume() {
        let paused = RunState::Running.transition(&Event::RemotePaused);
        assert_eq!(paused, RunState::Paused);

        let running = paused.transition(&Event::RemoteStarted);
        assert_eq!(running, RunState::Running);
    }

    #[test]
    fn test_stop_from_any_state() {
        let states = [RunState::Stopped, RunState::Paused, RunState::Running];

        for state in states {
            assert_eq!(state.transition(&Event::Finished), RunState::Stopped);
            assert_eq!(state.transition(&Event::RemoteStopped), RunState::Stopped);
        }
    }

    #[test]
    fn test_non_control_events_keep_state() {
        let events = [
            Event::StatusPing,
            Event::PhaseLabelUpdate(Label::new("Work")),
            Event::RoundLabelUpdate(Label::new("1/8")),
            Event::PresetLabelUpdate(Label::new("Tabata")),
            Event::DurationUpdate(30),
        ];

        for state in [RunState::Stopped, RunState::Paused, RunState::Running] {
            for event in &events {
                assert_eq!(state.transition(event), state);
            }
        }
    }

    #[test]
    fn test_remote_pause_while_stopped_mirrors_phone() {
        assert_eq!(
            RunState::Stopped.transition(&Event::RemotePaused),
            RunState::Paused
        );
    }
}
