//! Command interpreter
//!
//! Routes one decoded phone event to feedback and countdown transitions:
//!
//! | Event           | Haptics   | Backlight | Run state | Icon  |
//! |-----------------|-----------|-----------|-----------|-------|
//! | StartedWork     | work      | on        | Running   | pause |
//! | StartedRest     | rest      | on        | Running   | pause |
//! | Finished        | finished  | on        | Stopped   | play  |
//! | RemoteStarted   | double    |           | Running   | pause |
//! | RemotePaused    | double    |           | Paused    | play  |
//! | RemoteStopped   | double    |           | Stopped   | play  |
//!
//! Every stop also returns the radio to normal polling. Status pings
//! re-render the time, label updates replace face text, and a duration
//! update reloads both counters.

use crate::countdown::{render_time, request_pause, request_start, request_stop};
use crate::feedback::{FINISHED_PATTERN, REST_PATTERN, WORK_PATTERN};
use crate::state::{Event, TimerState};
use crate::traits::{Device, TextField};

/// Apply one phone event
pub fn handle_event<D: Device + ?Sized>(timer: &mut TimerState, device: &mut D, event: Event) {
    let expected = timer.run_state().transition(&event);

    match event {
        Event::StartedWork => {
            device.play(WORK_PATTERN);
            device.enable_interaction();
            request_start(timer, device);
        }
        Event::StartedRest => {
            device.play(REST_PATTERN);
            device.enable_interaction();
            request_start(timer, device);
        }
        Event::Finished => {
            device.play(FINISHED_PATTERN);
            device.enable_interaction();
            request_stop(timer, device);
        }
        Event::StatusPing => {
            render_time(timer, device);
        }
        Event::RemoteStarted => {
            device.double_pulse();
            request_start(timer, device);
        }
        Event::RemotePaused => {
            device.double_pulse();
            request_pause(timer, device);
        }
        Event::RemoteStopped => {
            device.double_pulse();
            request_stop(timer, device);
        }
        Event::PhaseLabelUpdate(label) => device.set_text(TextField::Phase, &label),
        Event::RoundLabelUpdate(label) => device.set_text(TextField::Round, &label),
        Event::PresetLabelUpdate(label) => device.set_text(TextField::Preset, &label),
        Event::DurationUpdate(seconds) => {
            timer.set_duration(seconds);
            timer.invalidate_render();
            render_time(timer, device);
        }
    }

    debug_assert_eq!(timer.run_state(), expected);
}
