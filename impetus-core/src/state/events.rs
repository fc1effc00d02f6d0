//! Events decoded from phone messages

use heapless::Vec;
use impetus_protocol::{Change, Label, PhaseChange, PhoneMessage, RemoteChange};

/// Upper bound on events one phone dictionary can produce
/// (change, preset, round, phase, time)
pub const MAX_EVENTS_PER_MESSAGE: usize = 5;

/// Events handled by the command interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Phase changes
    /// A work interval started
    StartedWork,
    /// A rest interval started
    StartedRest,
    /// The workout finished
    Finished,
    /// Keep-alive, redraw the remaining time
    StatusPing,

    // Mirrored control
    /// The phone stopped the timer
    RemoteStopped,
    /// The phone started or resumed the timer
    RemoteStarted,
    /// The phone paused the timer
    RemotePaused,

    // Display text
    PhaseLabelUpdate(Label),
    RoundLabelUpdate(Label),
    PresetLabelUpdate(Label),

    /// New phase duration in seconds
    DurationUpdate(u32),
}

impl From<Change> for Event {
    fn from(change: Change) -> Self {
        match change {
            Change::Phase(PhaseChange::Status) => Event::StatusPing,
            Change::Phase(PhaseChange::Work) => Event::StartedWork,
            Change::Phase(PhaseChange::Rest) => Event::StartedRest,
            Change::Phase(PhaseChange::Finished) => Event::Finished,
            Change::Remote(RemoteChange::Started) => Event::RemoteStarted,
            Change::Remote(RemoteChange::Paused) => Event::RemotePaused,
            Change::Remote(RemoteChange::Stopped) => Event::RemoteStopped,
        }
    }
}

impl Event {
    /// Split a phone dictionary into events
    ///
    /// Order: change, preset, round, phase, time. A message that starts a
    /// phase and carries its duration therefore starts running first and
    /// then loads the new duration.
    pub fn from_message(msg: PhoneMessage) -> Vec<Event, MAX_EVENTS_PER_MESSAGE> {
        let PhoneMessage {
            change,
            phase,
            round,
            preset,
            time,
        } = msg;

        let mut events = Vec::new();
        // At most one event per field, so pushes cannot fail
        if let Some(change) = change {
            let _ = events.push(Event::from(change));
        }
        if let Some(preset) = preset {
            let _ = events.push(Event::PresetLabelUpdate(preset));
        }
        if let Some(round) = round {
            let _ = events.push(Event::RoundLabelUpdate(round));
        }
        if let Some(phase) = phase {
            let _ = events.push(Event::PhaseLabelUpdate(phase));
        }
        if let Some(seconds) = time {
            let _ = events.push(Event::DurationUpdate(seconds));
        }
        events
    }

    /// Check if this event announces a new workout phase
    pub fn is_phase_event(&self) -> bool {
        matches!(
            self,
            Event::StartedWork | Event::StartedRest | Event::Finished
        )
    }

    /// Check if this event mirrors a start/pause/stop on the phone
    pub fn is_remote_event(&self) -> bool {
        matches!(
            self,
            Event::RemoteStarted | Event::RemotePaused | Event::RemoteStopped
        )
    }

    /// Check if this event only changes display text
    pub fn is_label_event(&self) -> bool {
        matches!(
            self,
            Event::PhaseLabelUpdate(_) | Event::RoundLabelUpdate(_) | Event::PresetLabelUpdate(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_mapping() {
        assert_eq!(
            Event::from(Change::Phase(PhaseChange::Work)),
            Event::StartedWork
        );
        assert_eq!(
            Event::from(Change::Phase(PhaseChange::Status)),
            Event::StatusPing
        );
        assert_eq!(
            Event::from(Change::Remote(RemoteChange::Stopped)),
            Event::RemoteStopped
        );
    }

    #[test]
    fn test_message_event_order() {
        let msg = PhoneMessage {
            change: Some(Change::Phase(PhaseChange::Rest)),
            phase: Some(Label::new("Rest")),
            round: Some(Label::new("2/8")),
            preset: Some(Label::new("Tabata")),
            time: Some(10),
        };

        let events = Event::from_message(msg);
        assert_eq!(
            &events[..],
            &[
                Event::StartedRest,
                Event::PresetLabelUpdate(Label::new("Tabata")),
                Event::RoundLabelUpdate(Label::new("2/8")),
                Event::PhaseLabelUpdate(Label::new("Rest")),
                Event::DurationUpdate(10),
            ]
        );
    }

    #[test]
    fn test_empty_message_has_no_events() {
        assert!(Event::from_message(PhoneMessage::default()).is_empty());
    }

    #[test]
    fn test_event_categories() {
        assert!(Event::StartedWork.is_phase_event());
        assert!(Event::Finished.is_phase_event());
        assert!(!Event::StatusPing.is_phase_event());

        assert!(Event::RemotePaused.is_remote_event());
        assert!(!Event::StartedRest.is_remote_event());

        assert!(Event::RoundLabelUpdate(Label::new("1")).is_label_event());
        assert!(!Event::DurationUpdate(5).is_label_event());
    }
}
