//! Watch face output

use crate::feedback::ActionIcon;

/// Text slots on the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextField {
    /// Remaining time, `MM:SS`
    Time,
    /// Current phase name ("Work", "Rest", "Offline", ...)
    Phase,
    /// Round counter ("3/8")
    Round,
    /// Workout preset name
    Preset,
}

/// Rendering surface
///
/// The face owns layout, fonts and bitmaps. The core only hands it text and
/// picks the action icon.
pub trait WatchFace {
    /// Replace the text shown in one slot
    fn set_text(&mut self, field: TextField, text: &str);

    /// Select the icon on the up-button slot of the action bar
    fn set_action_icon(&mut self, icon: ActionIcon);
}
