//! Controller
//!
//! Owns the timer state and the device, and turns every host event (tick,
//! phone message, button press, link report) into interpreter and
//! countdown calls.

use impetus_protocol::{Command, Label, PhoneMessage, SniffInterval};

use crate::countdown::{self, TickOutcome};
use crate::interpreter::handle_event;
use crate::state::{Event, TimerState};
use crate::traits::{Device, LinkError, TextField};

/// Physical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Select,
    Down,
}

/// Everything that can wake the controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    /// One second elapsed
    Tick,
    /// Dictionary from the phone
    Message(PhoneMessage),
    /// Button pressed, or auto-repeated while held
    Button(Button),
    /// The in-flight command reached the phone
    Delivered,
    /// The in-flight command was lost
    SendFailed,
    /// An inbound message was lost
    Dropped,
}

/// Ticks a command may stay in flight before the slot is reclaimed
pub const SEND_TIMEOUT_TICKS: u32 = 10;

/// Single outbound buffer
///
/// Holds the command handed to the link until the bridge reports it
/// delivered or failed. New commands are refused while one is in flight.
/// A report that never arrives is treated as a failure after
/// [`SEND_TIMEOUT_TICKS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundSlot {
    in_flight: Option<Command>,
    ticks_waiting: u32,
}

impl OutboundSlot {
    pub const fn new() -> Self {
        Self {
            in_flight: None,
            ticks_waiting: 0,
        }
    }

    /// Claim the slot for `command`
    pub fn begin(&mut self, command: Command) -> Result<(), LinkError> {
        if self.in_flight.is_some() {
            return Err(LinkError::Busy);
        }
        self.in_flight = Some(command);
        self.ticks_waiting = 0;
        Ok(())
    }

    /// Free the slot, returning the command that was in flight
    pub fn complete(&mut self) -> Option<Command> {
        self.ticks_waiting = 0;
        self.in_flight.take()
    }

    /// Age the in-flight command by one tick
    ///
    /// Returns the command if it has now waited too long; the slot is
    /// free again afterwards.
    pub fn expire(&mut self) -> Option<Command> {
        self.in_flight?;
        self.ticks_waiting += 1;
        if self.ticks_waiting >= SEND_TIMEOUT_TICKS {
            self.complete()
        } else {
            None
        }
    }

    pub fn in_flight(&self) -> Option<Command> {
        self.in_flight
    }

    pub fn is_free(&self) -> bool {
        self.in_flight.is_none()
    }
}

/// Timer controller
pub struct Controller<D> {
    timer: TimerState,
    device: D,
    outbound: OutboundSlot,
}

impl<D: Device> Controller<D> {
    pub fn new(device: D) -> Self {
        Self {
            timer: TimerState::new(),
            device,
            outbound: OutboundSlot::new(),
        }
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn outbound(&self) -> &OutboundSlot {
        &self.outbound
    }

    /// Show "Ready" and announce the watch to the phone
    pub fn start(&mut self) -> Result<(), LinkError> {
        self.device.set_text(TextField::Phase, &Label::ready());
        self.send(Command::Init)
    }

    /// Route one host event
    pub fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::Tick => {
                self.tick();
            }
            HostEvent::Message(msg) => self.handle_message(msg),
            HostEvent::Button(button) => self.button(button),
            HostEvent::Delivered => self.delivered(),
            HostEvent::SendFailed => self.send_failed(),
            HostEvent::Dropped => self.receive_dropped(),
        }
    }

    /// One second elapsed
    ///
    /// Also ages the outbound slot; an unanswered command is given up on
    /// and reported like a send failure.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = countdown::on_second_elapsed(&mut self.timer, &mut self.device);
        if self.outbound.expire().is_some() {
            self.show_offline();
        }
        outcome
    }

    /// Apply every key of a phone dictionary in decode order
    pub fn handle_message(&mut self, msg: PhoneMessage) {
        for event in Event::from_message(msg) {
            handle_event(&mut self.timer, &mut self.device, event);
        }
    }

    /// Forward a button press to the phone
    ///
    /// Up asks the radio to poll faster since a reply is expected soon;
    /// Down lets it relax. Select does nothing.
    pub fn button(&mut self, button: Button) {
        let (command, interval) = match button {
            Button::Up => (Command::Up, SniffInterval::Reduced),
            Button::Down => (Command::Down, SniffInterval::Normal),
            Button::Select => return,
        };
        // A refused or failed send is already reflected on the face
        let _ = self.send(command);
        self.device.set_sniff_interval(interval);
    }

    /// The bridge confirmed delivery
    pub fn delivered(&mut self) {
        self.outbound.complete();
    }

    /// The bridge gave up on the in-flight command
    pub fn send_failed(&mut self) {
        self.outbound.complete();
        self.show_offline();
    }

    /// An inbound message was lost; the phone resends state on its own
    pub fn receive_dropped(&mut self) {}

    fn send(&mut self, command: Command) -> Result<(), LinkError> {
        self.outbound.begin(command)?;
        self.device.send(command).inspect_err(|_| {
            self.outbound.complete();
            self.show_offline();
        })
    }

    fn show_offline(&mut self) {
        self.device.set_text(TextField::Phase, &Label::offline());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_single_buffer() {
        let mut slot = OutboundSlot::new();
        assert!(slot.is_free());

        slot.begin(Command::Up).unwrap();
        assert_eq!(slot.begin(Command::Down), Err(LinkError::Busy));
        assert_eq!(slot.in_flight(), Some(Command::Up));

        assert_eq!(slot.complete(), Some(Command::Up));
        assert!(slot.is_free());
        assert_eq!(slot.complete(), None);
    }

    #[test]
    fn test_slot_expires_unanswered_command() {
        let mut slot = OutboundSlot::new();
        assert_eq!(slot.expire(), None);

        slot.begin(Command::Init).unwrap();
        for _ in 1..SEND_TIMEOUT_TICKS {
            assert_eq!(slot.expire(), None);
        }
        assert_eq!(slot.expire(), Some(Command::Init));
        assert!(slot.is_free());

        slot.begin(Command::Up).unwrap();
        assert_eq!(slot.in_flight(), Some(Command::Up));
    }

    #[test]
    fn test_slot_timeout_restarts_per_command() {
        let mut slot = OutboundSlot::new();
        slot.begin(Command::Up).unwrap();
        for _ in 1..SEND_TIMEOUT_TICKS {
            slot.expire();
        }
        slot.complete();

        slot.begin(Command::Down).unwrap();
        assert_eq!(slot.expire(), None);
        assert_eq!(slot.in_flight(), Some(Command::Down));
    }
}
