//! Vibration motor task
//!
//! Plays on/off segment lists on the motor GPIO. A new request cuts the
//! current one short.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use crate::channels::{VibeRequest, VIBE_CMD};

/// Haptics task
#[embassy_executor::task]
pub async fn haptics_task(mut motor: Output<'static>, double_pulse: [u32; 3]) {
    info!("Haptics task started");

    motor.set_low();
    let mut request = VIBE_CMD.wait().await;

    loop {
        let segments: &[u32] = match &request {
            VibeRequest::Pattern(pattern) => pattern.segments(),
            VibeRequest::DoublePulse => &double_pulse,
        };
        debug!("Vibe: {} segments", segments.len());

        let next = match select(play(&mut motor, segments), VIBE_CMD.wait()).await {
            Either::First(()) => None,
            Either::Second(next) => {
                trace!("Vibe interrupted");
                Some(next)
            }
        };
        motor.set_low();

        request = match next {
            Some(next) => next,
            None => VIBE_CMD.wait().await,
        };
    }
}

/// Drive the motor through alternating on/off segments
async fn play(motor: &mut Output<'static>, segments: &[u32]) {
    for (i, &ms) in segments.iter().enumerate() {
        if i % 2 == 0 {
            motor.set_high();
        } else {
            motor.set_low();
        }
        Timer::after_millis(ms as u64).await;
    }
    motor.set_low();
}
