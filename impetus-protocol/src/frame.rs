//! UART framing between the watch and the BLE bridge
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): payload length (0-250)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-250 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// START + LENGTH + TYPE + CHECKSUM
pub const FRAME_OVERHEAD: usize = 4;

/// Largest possible encoded frame
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + FRAME_OVERHEAD;

/// Errors from frame encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Checksum byte did not match
    InvalidChecksum,
    /// LENGTH byte out of range, or payload does not fit its message type
    InvalidFrame,
    /// Output buffer too small for encoding
    BufferTooSmall,
}

/// One link frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Bytes this frame occupies on the wire
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + FRAME_OVERHEAD
    }

    /// Write the frame into `out`, returning the number of bytes used
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let total = self.encoded_len();
        let out = out.get_mut(..total).ok_or(FrameError::BufferTooSmall)?;

        let len = self.payload.len() as u8;
        out[0] = FRAME_START;
        out[1] = len;
        out[2] = self.msg_type;
        out[3..total - 1].copy_from_slice(&self.payload);
        out[total - 1] = checksum(len, self.msg_type, &self.payload);

        Ok(total)
    }
}

fn checksum(len: u8, msg_type: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(len ^ msg_type, |acc, b| acc ^ b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sync,
    Length,
    Type,
    Payload,
    Checksum,
}

/// Incremental frame decoder fed one byte at a time
///
/// Noise before a START byte is skipped. After any error the decoder goes
/// back to hunting for the next START byte.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    stage: Stage,
    len: u8,
    msg_type: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            stage: Stage::Sync,
            len: 0,
            msg_type: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.len = 0;
        self.msg_type = 0;
        self.payload.clear();
    }

    /// True while a frame is partially received
    pub fn in_frame(&self) -> bool {
        self.stage != Stage::Sync
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` once a frame completes, `Ok(None)` while
    /// more bytes are needed.
    pub fn push(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.stage {
            Stage::Sync => {
                if byte == FRAME_START {
                    self.stage = Stage::Length;
                }
            }
            Stage::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.len = byte;
                self.stage = Stage::Type;
            }
            Stage::Type => {
                self.msg_type = byte;
                self.payload.clear();
                self.stage = if self.len == 0 {
                    Stage::Checksum
                } else {
                    Stage::Payload
                };
            }
            Stage::Payload => {
                // Length was bounded in Stage::Length
                let _ = self.payload.push(byte);
                if self.payload.len() == self.len as usize {
                    self.stage = Stage::Checksum;
                }
            }
            Stage::Checksum => {
                let expected = checksum(self.len, self.msg_type, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }
                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
