//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use impetus_core::controller::HostEvent;
use impetus_core::feedback::VibePattern;
use impetus_core::runtime::HOST_EVENT_QUEUE_SIZE;
use impetus_protocol::WatchMessage;

/// Outbound link queue depth
const OUTBOUND_QUEUE_SIZE: usize = 4;

/// Phone messages, button presses and link reports for the controller
pub static HOST_EVENTS: Channel<CriticalSectionRawMutex, HostEvent, HOST_EVENT_QUEUE_SIZE> =
    Channel::new();

/// Frames waiting for the link TX task
pub static OUTBOUND: Channel<CriticalSectionRawMutex, WatchMessage, OUTBOUND_QUEUE_SIZE> =
    Channel::new();

/// Vibration request for the haptics task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VibeRequest {
    Pattern(VibePattern),
    DoublePulse,
}

/// Latest vibration request; a new one replaces whatever is playing
pub static VIBE_CMD: Signal<CriticalSectionRawMutex, VibeRequest> = Signal::new();

/// Wearer-interaction signal, lights the display
pub static BACKLIGHT_ON: Signal<CriticalSectionRawMutex, ()> = Signal::new();
