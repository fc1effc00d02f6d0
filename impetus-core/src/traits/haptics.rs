//! Vibration motor and backlight

use crate::feedback::VibePattern;

/// Vibration motor
pub trait Haptics {
    /// Queue a custom pattern, replacing whatever is playing
    fn play(&mut self, pattern: VibePattern);

    /// Short two-pulse acknowledgement for mirrored start/pause/stop
    fn double_pulse(&mut self);
}

/// Display backlight
pub trait Backlight {
    /// Light the display as if the wearer had interacted with the watch
    ///
    /// The light switches itself off after the platform timeout.
    fn enable_interaction(&mut self);
}
