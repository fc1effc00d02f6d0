//! Main controller task
//!
//! Owns the timer controller and feeds it ticks and host events.

use defmt::*;

use impetus_core::controller::Controller;
use impetus_core::runtime;

use crate::channels::HOST_EVENTS;
use crate::device::WatchDevice;
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task() {
    info!("Controller task started");

    let mut controller = Controller::new(WatchDevice::new());

    // Sends Init, then dispatches forever
    runtime::run(&mut controller, &TICK_SIGNAL, &HOST_EVENTS).await
}
