//! Controller-facing device
//!
//! Implements the core traits on top of the task channels. There is no
//! panel driver yet: the face is kept in RAM and reported over RTT.

use defmt::*;
use heapless::String;

use impetus_core::feedback::{ActionIcon, VibePattern};
use impetus_core::traits::{Backlight, Haptics, LinkError, PhoneLink, TextField, WatchFace};
use impetus_protocol::{Command, SniffInterval, WatchMessage};

use crate::channels::{VibeRequest, BACKLIGHT_ON, OUTBOUND, VIBE_CMD};

/// Room for a label or an `MM:SS` time with long minutes
const FIELD_CAPACITY: usize = 40;

/// Face contents as last set by the controller
#[derive(Default)]
struct FaceState {
    time: String<FIELD_CAPACITY>,
    phase: String<FIELD_CAPACITY>,
    round: String<FIELD_CAPACITY>,
    preset: String<FIELD_CAPACITY>,
    icon: ActionIcon,
}

impl FaceState {
    fn field_mut(&mut self, field: TextField) -> &mut String<FIELD_CAPACITY> {
        match field {
            TextField::Time => &mut self.time,
            TextField::Phase => &mut self.phase,
            TextField::Round => &mut self.round,
            TextField::Preset => &mut self.preset,
        }
    }
}

/// Device handed to the core controller
#[derive(Default)]
pub struct WatchDevice {
    face: FaceState,
}

impl WatchDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dump the whole face over RTT
    fn report(&self) {
        let face = &self.face;
        debug!(
            "Face [{}] {} | {} | {} | {:?}",
            face.time.as_str(),
            face.phase.as_str(),
            face.round.as_str(),
            face.preset.as_str(),
            face.icon
        );
    }

    fn queue(&self, msg: WatchMessage) -> Result<(), LinkError> {
        OUTBOUND.try_send(msg).map_err(|_| LinkError::QueueFull)
    }
}

impl WatchFace for WatchDevice {
    fn set_text(&mut self, field: TextField, text: &str) {
        let slot = self.face.field_mut(field);
        slot.clear();
        // Labels are bounded well below capacity
        let _ = slot.push_str(text);

        if field != TextField::Time {
            info!("{:?} text: {}", field, text);
        }
        self.report();
    }

    fn set_action_icon(&mut self, icon: ActionIcon) {
        if self.face.icon != icon {
            self.face.icon = icon;
            self.report();
        }
    }
}

impl Haptics for WatchDevice {
    fn play(&mut self, pattern: VibePattern) {
        VIBE_CMD.signal(VibeRequest::Pattern(pattern));
    }

    fn double_pulse(&mut self) {
        VIBE_CMD.signal(VibeRequest::DoublePulse);
    }
}

impl Backlight for WatchDevice {
    fn enable_interaction(&mut self) {
        BACKLIGHT_ON.signal(());
    }
}

impl PhoneLink for WatchDevice {
    fn send(&mut self, command: Command) -> Result<(), LinkError> {
        debug!("Send {:?}", command);
        self.queue(WatchMessage::Command(command))
    }

    fn set_sniff_interval(&mut self, interval: SniffInterval) {
        if self.queue(WatchMessage::Sniff(interval)).is_err() {
            warn!("Outbound queue full, sniff {:?} dropped", interval);
        }
    }
}
