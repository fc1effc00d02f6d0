//! Button input task
//!
//! One instance per button. Up and Down auto-repeat while held.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use impetus_core::controller::{Button, HostEvent};

use crate::channels::HOST_EVENTS;

/// Contact bounce settle time
const DEBOUNCE_MS: u64 = 20;

/// Button task - buttons are active low with pull-ups
#[embassy_executor::task(pool_size = 3)]
pub async fn button_task(mut pin: Input<'static>, button: Button, repeat_ms: u16) {
    info!("Button task started: {:?}", button);

    let repeat = Duration::from_millis(repeat_ms as u64);
    let repeats = matches!(button, Button::Up | Button::Down);

    loop {
        pin.wait_for_low().await;
        Timer::after_millis(DEBOUNCE_MS).await;
        if pin.is_high() {
            continue;
        }

        press(button);

        if repeats {
            // Re-fire until released
            while let Either::First(()) = select(Timer::after(repeat), pin.wait_for_high()).await {
                press(button);
            }
        } else {
            pin.wait_for_high().await;
        }
        Timer::after_millis(DEBOUNCE_MS).await;
    }
}

fn press(button: Button) {
    debug!("Button {:?}", button);
    if HOST_EVENTS.try_send(HostEvent::Button(button)).is_err() {
        warn!("Host event channel full, dropping {:?}", button);
    }
}
