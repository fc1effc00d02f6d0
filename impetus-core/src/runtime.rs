//! Event loop plumbing
//!
//! The controller consumes two sources: a tick signal raised once per
//! elapsed second, and a bounded channel of everything else. Both are
//! generic over the raw mutex so the loop runs on target with
//! `CriticalSectionRawMutex` and in host tests with `NoopRawMutex`.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::controller::{Controller, HostEvent};
use crate::traits::Device;

/// Depth of the host event channel used by the firmware
pub const HOST_EVENT_QUEUE_SIZE: usize = 8;

/// Wait for the next thing to handle
///
/// A pending tick wins over queued host events.
pub async fn next_event<M: RawMutex, const N: usize>(
    ticks: &Signal<M, ()>,
    inbox: &Channel<M, HostEvent, N>,
) -> HostEvent {
    match select(ticks.wait(), inbox.receive()).await {
        Either::First(()) => HostEvent::Tick,
        Either::Second(event) => event,
    }
}

/// Announce the watch, then dispatch events forever
pub async fn run<M: RawMutex, D: Device, const N: usize>(
    controller: &mut Controller<D>,
    ticks: &Signal<M, ()>,
    inbox: &Channel<M, HostEvent, N>,
) -> ! {
    // A failed announcement already shows "Offline"
    let _ = controller.start();
    loop {
        let event = next_event(ticks, inbox).await;
        controller.dispatch(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Button;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_tick_signal_becomes_tick_event() {
        let ticks: Signal<NoopRawMutex, ()> = Signal::new();
        let inbox: Channel<NoopRawMutex, HostEvent, 4> = Channel::new();

        ticks.signal(());
        assert_eq!(block_on(next_event(&ticks, &inbox)), HostEvent::Tick);
        assert!(!ticks.signaled());
    }

    #[test]
    fn test_inbox_events_in_order() {
        let ticks: Signal<NoopRawMutex, ()> = Signal::new();
        let inbox: Channel<NoopRawMutex, HostEvent, 4> = Channel::new();

        inbox.try_send(HostEvent::Button(Button::Up)).unwrap();
        inbox.try_send(HostEvent::Delivered).unwrap();

        assert_eq!(
            block_on(next_event(&ticks, &inbox)),
            HostEvent::Button(Button::Up)
        );
        assert_eq!(block_on(next_event(&ticks, &inbox)), HostEvent::Delivered);
    }

    #[test]
    fn test_tick_takes_priority() {
        let ticks: Signal<NoopRawMutex, ()> = Signal::new();
        let inbox: Channel<NoopRawMutex, HostEvent, 4> = Channel::new();

        inbox.try_send(HostEvent::Dropped).unwrap();
        ticks.signal(());

        assert_eq!(block_on(next_event(&ticks, &inbox)), HostEvent::Tick);
        assert_eq!(block_on(next_event(&ticks, &inbox)), HostEvent::Dropped);
    }
}
