//! Outbound half of the phone link

use impetus_protocol::{Command, SniffInterval};

/// Errors from the phone link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// A command is already in flight
    Busy,
    /// Outbound queue to the radio is full
    QueueFull,
    /// The command could not be encoded
    Encode,
}

/// Commands to the phone
pub trait PhoneLink {
    /// Hand one command to the radio
    ///
    /// `Ok` means the command was queued, not delivered. Delivery is
    /// reported later as a separate host event.
    fn send(&mut self, command: Command) -> Result<(), LinkError>;

    /// Ask the radio for a different polling interval
    fn set_sniff_interval(&mut self, interval: SniffInterval);
}
