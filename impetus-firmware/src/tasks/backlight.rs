//! Backlight task
//!
//! Lights the display on request and switches it off after the configured
//! timeout. Requests during the on-time restart the timeout.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Timer};

use crate::channels::BACKLIGHT_ON;

#[embassy_executor::task]
pub async fn backlight_task(mut light: Output<'static>, timeout_ms: u32) {
    info!("Backlight task started");

    let timeout = Duration::from_millis(timeout_ms as u64);
    light.set_low();

    loop {
        BACKLIGHT_ON.wait().await;
        light.set_high();
        trace!("Backlight on");

        while let Either::Second(()) = select(Timer::after(timeout), BACKLIGHT_ON.wait()).await {}

        light.set_low();
        trace!("Backlight off");
    }
}
