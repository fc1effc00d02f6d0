//! Typed messages carried by link frames
//!
//! Message types are divided into two categories:
//! - Bridge → Watch: phone dictionaries and delivery reports
//! - Watch → Bridge: command dictionaries and radio power requests

use heapless::Vec;

use crate::codes::{
    Change, Command, SniffInterval, KEY_CHANGE, KEY_COMMAND, KEY_PHASE, KEY_PRESET, KEY_ROUND,
    KEY_TIME,
};
use crate::dict::{DictError, DictReader, DictWriter};
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::label::Label;

// Message type IDs: both directions
pub const MSG_DICT: u8 = 0x01;

// Message type IDs: Bridge → Watch
pub const MSG_DELIVERED: u8 = 0x02;
pub const MSG_SEND_FAILED: u8 = 0x03;
pub const MSG_DROPPED: u8 = 0x04;

// Message type IDs: Watch → Bridge
pub const MSG_SNIFF: u8 = 0x10;

impl From<DictError> for FrameError {
    fn from(_: DictError) -> Self {
        FrameError::InvalidFrame
    }
}

/// One dictionary received from the phone
///
/// Every field is optional; the phone sends only what changed. Keys the
/// watch does not know, and values of the wrong type, are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhoneMessage {
    pub change: Option<Change>,
    pub phase: Option<Label>,
    pub round: Option<Label>,
    pub preset: Option<Label>,
    /// Duration of the current phase in seconds
    pub time: Option<u32>,
}

impl PhoneMessage {
    /// Decode a phone dictionary
    ///
    /// Only an empty buffer is an error. A malformed tuple ends decoding but
    /// keeps the fields read before it.
    pub fn decode(payload: &[u8]) -> Result<Self, DictError> {
        let dict = DictReader::new(payload)?;
        let label = |key| dict.find(key).and_then(|v| v.as_str()).map(Label::new);

        Ok(Self {
            change: dict
                .find(KEY_CHANGE)
                .and_then(|v| v.as_uint())
                .and_then(Change::from_code),
            phase: label(KEY_PHASE),
            round: label(KEY_ROUND),
            preset: label(KEY_PRESET),
            time: dict.find(KEY_TIME).and_then(|v| v.as_uint()),
        })
    }

    /// Encode as the phone would (bridge simulators and tests)
    pub fn encode(&self) -> Result<Vec<u8, MAX_PAYLOAD_SIZE>, DictError> {
        let mut w = DictWriter::new();
        if let Some(change) = self.change {
            w.push_uint(KEY_CHANGE, change.to_code())?;
        }
        if let Some(phase) = &self.phase {
            w.push_str(KEY_PHASE, phase)?;
        }
        if let Some(round) = &self.round {
            w.push_str(KEY_ROUND, round)?;
        }
        if let Some(preset) = &self.preset {
            w.push_str(KEY_PRESET, preset)?;
        }
        if let Some(time) = self.time {
            w.push_uint(KEY_TIME, time)?;
        }
        Ok(w.finish())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Frames the BLE bridge sends to the watch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeMessage {
    /// A dictionary from the phone
    Phone(PhoneMessage),
    /// The last outbound dictionary reached the phone
    Delivered,
    /// The last outbound dictionary could not be delivered
    SendFailed { reason: u8 },
    /// An inbound message was lost before it reached the watch
    Dropped { reason: u8 },
}

impl BridgeMessage {
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let reason = || frame.payload.first().copied().unwrap_or(0);
        match frame.msg_type {
            MSG_DICT => Ok(BridgeMessage::Phone(PhoneMessage::decode(&frame.payload)?)),
            MSG_DELIVERED => Ok(BridgeMessage::Delivered),
            MSG_SEND_FAILED => Ok(BridgeMessage::SendFailed { reason: reason() }),
            MSG_DROPPED => Ok(BridgeMessage::Dropped { reason: reason() }),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode into a frame (bridge simulators and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeMessage::Phone(msg) => Frame::new(MSG_DICT, &msg.encode()?),
            BridgeMessage::Delivered => Ok(Frame::empty(MSG_DELIVERED)),
            BridgeMessage::SendFailed { reason } => Frame::new(MSG_SEND_FAILED, &[*reason]),
            BridgeMessage::Dropped { reason } => Frame::new(MSG_DROPPED, &[*reason]),
        }
    }
}

/// Frames the watch sends to the BLE bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchMessage {
    /// Button or startup command for the phone
    Command(Command),
    /// Change the radio polling interval
    Sniff(SniffInterval),
}

impl WatchMessage {
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            WatchMessage::Command(cmd) => {
                let mut w = DictWriter::new();
                w.push_u8(KEY_COMMAND, cmd.to_byte())?;
                Frame::new(MSG_DICT, &w.finish())
            }
            WatchMessage::Sniff(interval) => Frame::new(MSG_SNIFF, &[interval.to_byte()]),
        }
    }

    /// Parse a watch frame (bridge side)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_DICT => {
                let dict = DictReader::new(&frame.payload)?;
                dict.find(KEY_COMMAND)
                    .and_then(|v| v.as_uint())
                    .and_then(|code| u8::try_from(code).ok())
                    .and_then(Command::from_byte)
                    .map(WatchMessage::Command)
                    .ok_or(FrameError::InvalidFrame)
            }
            MSG_SNIFF => frame
                .payload
                .first()
                .copied()
                .and_then(SniffInterval::from_byte)
                .map(WatchMessage::Sniff)
                .ok_or(FrameError::InvalidFrame),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}
