//! Impetus phone link protocol
//!
//! This crate defines everything that crosses the link between the watch and
//! the paired phone application:
//!
//! - message keys and change codes ([`codes`])
//! - the key/value dictionary payload format ([`dict`])
//! - bounded display labels ([`label`])
//! - typed inbound/outbound messages ([`messages`])
//! - the UART framing used towards the BLE bridge ([`frame`])
//!
//! # Link Overview
//!
//! ```text
//! ┌────────┐   BLE    ┌────────────┐   UART frames   ┌────────┐
//! │ Phone  │ ◄──────► │ BLE bridge │ ◄─────────────► │ Watch  │
//! └────────┘          └────────────┘                 └────────┘
//! ```
//!
//! The phone is the authority on the workout; the watch forwards button
//! presses as command codes and mirrors whatever state the phone reports.

// std only for the test harness (proptest needs it)
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod codes;
pub mod dict;
pub mod frame;
pub mod label;
pub mod messages;

pub use codes::{Change, Command, PhaseChange, RemoteChange, SniffInterval};
pub use dict::{DictError, DictReader, DictWriter, Tuple, Value};
pub use frame::{Frame, FrameDecoder, FrameError, FRAME_START, MAX_PAYLOAD_SIZE};
pub use label::{Label, MAX_LABEL_CHARS};
pub use messages::{BridgeMessage, PhoneMessage, WatchMessage};
