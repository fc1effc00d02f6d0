//! Countdown engine
//!
//! Advances the timer once per elapsed second and keeps the time text on the
//! face in sync with `current_seconds`. Idle ticks hold the display at the
//! full phase duration.

use core::fmt::Write;

use heapless::String;
use impetus_protocol::SniffInterval;

use crate::feedback::ActionIcon;
use crate::state::{RunState, TimerState};
use crate::traits::{PhoneLink, TextField, WatchFace};

/// Fits `u32::MAX` seconds as minutes and seconds
pub type TimeText = String<12>;

/// What one tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Not running; display held at the full duration
    Idle,
    /// One second counted down
    CountedDown,
    /// The countdown reached zero and stopped on its own
    TimedOut,
}

/// Format seconds as `MM:SS`
///
/// Minutes are not wrapped at 60, so `3600` renders as `"60:00"`.
pub fn format_time(seconds: u32) -> TimeText {
    let mut text = TimeText::new();
    // Capacity covers the widest u32 value
    let _ = write!(text, "{:02}:{:02}", seconds / 60, seconds % 60);
    text
}

/// Push the remaining time to the face if it changed since the last render
///
/// Returns whether the face was updated.
pub fn render_time<F: WatchFace + ?Sized>(timer: &mut TimerState, face: &mut F) -> bool {
    if !timer.needs_render() {
        return false;
    }
    face.set_text(TextField::Time, &format_time(timer.current_seconds()));
    timer.mark_rendered();
    true
}

/// Advance the countdown by one second
///
/// Must be called exactly once per elapsed second. Reaching zero while
/// running stops the timer; the action icon is left for the phone to update.
pub fn on_second_elapsed<F: WatchFace + ?Sized>(
    timer: &mut TimerState,
    face: &mut F,
) -> TickOutcome {
    let outcome = if timer.run_state().is_running() {
        if timer.count_down() == 0 {
            timer.set_run_state(RunState::Stopped);
            TickOutcome::TimedOut
        } else {
            TickOutcome::CountedDown
        }
    } else {
        timer.reset_to_total();
        TickOutcome::Idle
    };

    render_time(timer, face);
    outcome
}

/// Mirror a start on the phone
pub fn request_start<F: WatchFace + ?Sized>(timer: &mut TimerState, face: &mut F) {
    timer.set_run_state(RunState::Running);
    face.set_action_icon(ActionIcon::Pause);
}

/// Mirror a pause on the phone
pub fn request_pause<F: WatchFace + ?Sized>(timer: &mut TimerState, face: &mut F) {
    timer.set_run_state(RunState::Paused);
    face.set_action_icon(ActionIcon::Play);
}

/// Mirror a stop on the phone, and let the radio go back to normal polling
pub fn request_stop<D: WatchFace + PhoneLink + ?Sized>(timer: &mut TimerState, device: &mut D) {
    timer.set_run_state(RunState::Stopped);
    device.set_action_icon(ActionIcon::Play);
    device.set_sniff_interval(SniffInterval::Normal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec;

    #[derive(Default)]
    struct Face {
        times: Vec<std::string::String>,
        icon: Option<ActionIcon>,
    }

    impl WatchFace for Face {
        fn set_text(&mut self, field: TextField, text: &str) {
            if field == TextField::Time {
                self.times.push(text.into());
            }
        }

        fn set_action_icon(&mut self, icon: ActionIcon) {
            self.icon = Some(icon);
        }
    }

    fn running(seconds: u32) -> TimerState {
        let mut timer = TimerState::new();
        timer.set_duration(seconds);
        timer.set_run_state(RunState::Running);
        timer
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(65).as_str(), "01:05");
        assert_eq!(format_time(0).as_str(), "00:00");
        assert_eq!(format_time(59).as_str(), "00:59");
        assert_eq!(format_time(3600).as_str(), "60:00");
        assert_eq!(format_time(6000).as_str(), "100:00");
    }

    #[test]
    fn test_format_time_widest_value() {
        assert_eq!(format_time(u32::MAX).as_str(), "71582788:15");
    }

    #[test]
    fn test_render_time_once_per_change() {
        let mut timer = TimerState::new();
        timer.set_duration(30);
        let mut face = Face::default();

        assert!(render_time(&mut timer, &mut face));
        assert!(!render_time(&mut timer, &mut face));
        assert_eq!(face.times, ["00:30"]);
    }

    #[test]
    fn test_first_render_at_zero() {
        let mut timer = TimerState::new();
        let mut face = Face::default();

        assert!(render_time(&mut timer, &mut face));
        assert_eq!(face.times, ["00:00"]);
    }

    #[test]
    fn test_running_tick_counts_down() {
        let mut timer = running(3);
        let mut face = Face::default();

        assert_eq!(on_second_elapsed(&mut timer, &mut face), TickOutcome::CountedDown);
        assert_eq!(timer.current_seconds(), 2);
        assert_eq!(face.times, ["00:02"]);
    }

    #[test]
    fn test_timeout_stops_without_touching_icon() {
        let mut timer = running(1);
        let mut face = Face::default();

        assert_eq!(on_second_elapsed(&mut timer, &mut face), TickOutcome::TimedOut);
        assert_eq!(timer.run_state(), RunState::Stopped);
        assert_eq!(face.icon, None);
    }

    #[test]
    fn test_running_at_zero_stops_immediately() {
        let mut timer = running(0);
        let mut face = Face::default();

        assert_eq!(on_second_elapsed(&mut timer, &mut face), TickOutcome::TimedOut);
        assert_eq!(timer.current_seconds(), 0);
        assert_eq!(timer.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_idle_tick_resets_to_total() {
        let mut timer = running(10);
        let mut face = Face::default();
        on_second_elapsed(&mut timer, &mut face);
        on_second_elapsed(&mut timer, &mut face);
        assert_eq!(timer.current_seconds(), 8);

        request_pause(&mut timer, &mut face);
        assert_eq!(on_second_elapsed(&mut timer, &mut face), TickOutcome::Idle);
        assert_eq!(timer.current_seconds(), 10);
        assert_eq!(face.times.last().map(|s| s.as_str()), Some("00:10"));

        // Held value is not rendered again
        on_second_elapsed(&mut timer, &mut face);
        assert_eq!(face.times.len(), 3);
    }

    #[test]
    fn test_request_start_and_pause_set_icon() {
        let mut timer = TimerState::new();
        let mut face = Face::default();

        request_start(&mut timer, &mut face);
        assert_eq!(timer.run_state(), RunState::Running);
        assert_eq!(face.icon, Some(ActionIcon::Pause));

        request_pause(&mut timer, &mut face);
        assert_eq!(timer.run_state(), RunState::Paused);
        assert_eq!(face.icon, Some(ActionIcon::Play));
    }

    proptest! {
        #[test]
        fn prop_countdown_is_monotonic_then_stops(total in 1u32..300, extra in 0u32..20) {
            let mut timer = running(total);
            let mut face = Face::default();
            let mut last = timer.current_seconds();

            for _ in 0..total {
                prop_assert!(timer.run_state().is_running());
                on_second_elapsed(&mut timer, &mut face);
                prop_assert!(timer.current_seconds() < last);
                last = timer.current_seconds();
            }
            prop_assert_eq!(timer.current_seconds(), 0);
            prop_assert_eq!(timer.run_state(), RunState::Stopped);
            // One render per second counted
            prop_assert_eq!(face.times.len() as u32, total);

            for _ in 0..extra {
                on_second_elapsed(&mut timer, &mut face);
                prop_assert_eq!(timer.run_state(), RunState::Stopped);
                prop_assert_eq!(timer.current_seconds(), total);
            }
        }
    }
}
