//! Configuration type definitions
//!
//! The firmware build validates `watch.toml` and embeds the result as a
//! postcard blob. At boot the blob is decoded and validated again.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current config layout version
pub const CONFIG_VERSION: u8 = 1;

/// Largest postcard encoding of [`WatchConfig`] (varints included)
pub const MAX_CONFIG_SIZE: usize = 32;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Blob could not be decoded
    Deserialize,
    /// Output buffer too small
    Serialize,
    /// Blob written for another layout version
    VersionMismatch,
    /// Tick interval outside 100..=10000 ms
    InvalidTickInterval,
    /// Button repeat outside 20..=1000 ms
    InvalidButtonRepeat,
    /// Backlight timeout outside 500..=60000 ms
    InvalidBacklightTimeout,
    /// Double pulse segment outside 20..=500 ms
    InvalidDoublePulse,
}

/// Watch settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WatchConfig {
    /// Layout version
    pub version: u8,
    /// Countdown tick period, one second on real hardware
    pub tick_interval_ms: u32,
    /// Auto-repeat period while Up or Down is held
    pub button_repeat_ms: u16,
    /// How long the backlight stays on after an interaction
    pub backlight_timeout_ms: u32,
    /// On and off time of each double-pulse segment
    pub double_pulse_ms: u16,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            tick_interval_ms: 1000,
            button_repeat_ms: 100,
            backlight_timeout_ms: 3000,
            double_pulse_ms: 100,
        }
    }
}

impl WatchConfig {
    /// Check every field is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        if !(100..=10_000).contains(&self.tick_interval_ms) {
            return Err(ConfigError::InvalidTickInterval);
        }
        if !(20..=1000).contains(&self.button_repeat_ms) {
            return Err(ConfigError::InvalidButtonRepeat);
        }
        if !(500..=60_000).contains(&self.backlight_timeout_ms) {
            return Err(ConfigError::InvalidBacklightTimeout);
        }
        if !(20..=500).contains(&self.double_pulse_ms) {
            return Err(ConfigError::InvalidDoublePulse);
        }
        Ok(())
    }

    /// Segments of the double-pulse acknowledgement: on, off, on
    pub fn double_pulse_segments(&self) -> [u32; 3] {
        let ms = u32::from(self.double_pulse_ms);
        [ms, ms, ms]
    }

    /// Decode and validate a postcard blob
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }
}
