//! Embedded watch configuration
//!
//! `build.rs` validates watch.toml and writes it as a postcard blob. The
//! blob is checked again at boot; anything wrong falls back to defaults.

use defmt::*;

use impetus_core::config::WatchConfig;

/// Postcard blob produced by the build script
static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/watch_config.bin"));

/// Load the embedded configuration
pub fn load() -> WatchConfig {
    match WatchConfig::from_bytes(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: tick={}ms repeat={}ms backlight={}ms pulse={}ms",
                config.tick_interval_ms,
                config.button_repeat_ms,
                config.backlight_timeout_ms,
                config.double_pulse_ms
            );
            config
        }
        Err(e) => {
            warn!("Embedded config rejected ({:?}), using defaults", e);
            WatchConfig::default()
        }
    }
}
