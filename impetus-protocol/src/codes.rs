//! Numeric codes shared with the phone application
//!
//! The phone sends a single `change` integer whose value space is split in
//! two: codes 0-2 report that the phone started/paused/stopped the timer,
//! codes 3-6 announce a new phase. They are decoded into two separate
//! types so the rest of the firmware never sees the raw numbers.

// Inbound dictionary keys
pub const KEY_PHASE: u32 = 0x01;
pub const KEY_ROUND: u32 = 0x02;
pub const KEY_CHANGE: u32 = 0x03;
pub const KEY_TIME: u32 = 0x04;
pub const KEY_PRESET: u32 = 0x05;

// Outbound dictionary key
pub const KEY_COMMAND: u32 = 0x00;

// Change codes
const CHANGE_STARTED: u32 = 0x00;
const CHANGE_PAUSED: u32 = 0x01;
const CHANGE_STOPPED: u32 = 0x02;
const CHANGE_STATUS: u32 = 0x03;
const CHANGE_WORK: u32 = 0x04;
const CHANGE_REST: u32 = 0x05;
const CHANGE_FINISHED: u32 = 0x06;
/// Sent by some phone builds after the watch announces itself. Carries no
/// meaning for the watch and is ignored.
pub const CHANGE_INIT: u32 = 0x07;

// Command codes
const COMMAND_SELECT: u8 = 0x00;
const COMMAND_UP: u8 = 0x01;
const COMMAND_DOWN: u8 = 0x02;
const COMMAND_INIT: u8 = 0x03;

/// The phone started, paused or stopped the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteChange {
    Started,
    Paused,
    Stopped,
}

impl RemoteChange {
    /// Decode from a `change` value, `None` if outside this type's range
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            CHANGE_STARTED => Some(RemoteChange::Started),
            CHANGE_PAUSED => Some(RemoteChange::Paused),
            CHANGE_STOPPED => Some(RemoteChange::Stopped),
            _ => None,
        }
    }

    pub fn to_code(self) -> u32 {
        match self {
            RemoteChange::Started => CHANGE_STARTED,
            RemoteChange::Paused => CHANGE_PAUSED,
            RemoteChange::Stopped => CHANGE_STOPPED,
        }
    }
}

/// The phone moved the workout into a new phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseChange {
    /// Keep-alive, asks the watch to redraw its remaining time
    Status,
    /// A work interval started
    Work,
    /// A rest interval started
    Rest,
    /// The whole workout finished
    Finished,
}

impl PhaseChange {
    /// Decode from a `change` value, `None` if outside this type's range
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            CHANGE_STATUS => Some(PhaseChange::Status),
            CHANGE_WORK => Some(PhaseChange::Work),
            CHANGE_REST => Some(PhaseChange::Rest),
            CHANGE_FINISHED => Some(PhaseChange::Finished),
            _ => None,
        }
    }

    pub fn to_code(self) -> u32 {
        match self {
            PhaseChange::Status => CHANGE_STATUS,
            PhaseChange::Work => CHANGE_WORK,
            PhaseChange::Rest => CHANGE_REST,
            PhaseChange::Finished => CHANGE_FINISHED,
        }
    }
}

/// A decoded `change` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Change {
    Remote(RemoteChange),
    Phase(PhaseChange),
}

impl Change {
    /// Decode a raw `change` value
    ///
    /// Unknown and reserved codes return `None` so newer phone builds can add
    /// codes without breaking older watches.
    pub fn from_code(code: u32) -> Option<Self> {
        RemoteChange::from_code(code)
            .map(Change::Remote)
            .or_else(|| PhaseChange::from_code(code).map(Change::Phase))
    }

    pub fn to_code(self) -> u32 {
        match self {
            Change::Remote(r) => r.to_code(),
            Change::Phase(p) => p.to_code(),
        }
    }
}

/// Command codes sent from the watch to the phone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Select,
    Up,
    Down,
    /// Sent once at startup to request the current workout state
    Init,
}

impl Command {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            COMMAND_SELECT => Some(Command::Select),
            COMMAND_UP => Some(Command::Up),
            COMMAND_DOWN => Some(Command::Down),
            COMMAND_INIT => Some(Command::Init),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Command::Select => COMMAND_SELECT,
            Command::Up => COMMAND_UP,
            Command::Down => COMMAND_DOWN,
            Command::Init => COMMAND_INIT,
        }
    }
}

/// Radio polling interval requested from the BLE bridge
///
/// Reduced polling lowers latency for a burst of button presses at the cost
/// of battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SniffInterval {
    #[default]
    Normal,
    Reduced,
}

impl SniffInterval {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(SniffInterval::Normal),
            1 => Some(SniffInterval::Reduced),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            SniffInterval::Normal => 0,
            SniffInterval::Reduced => 1,
        }
    }
}
