//! Bounded display labels
//!
//! The watch face has room for ten characters in each text field. Labels
//! longer than that are cut at the tenth character, never in the middle of
//! a UTF-8 sequence.

use core::fmt;
use core::ops::Deref;

use heapless::String;

/// Maximum visible characters in a label
pub const MAX_LABEL_CHARS: usize = 10;

/// Byte capacity: ten characters of up to four UTF-8 bytes each
const LABEL_CAPACITY: usize = MAX_LABEL_CHARS * 4;

/// Text shown when an outbound message could not be delivered
pub const OFFLINE_TEXT: &str = "Offline";

/// Phase text shown at startup until the phone answers
pub const READY_TEXT: &str = "Ready";

/// A phase, round or preset name
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Label(String<LABEL_CAPACITY>);

impl Label {
    /// Build a label, truncating to [`MAX_LABEL_CHARS`] characters
    pub fn new(text: &str) -> Self {
        let mut inner = String::new();
        for ch in text.chars().take(MAX_LABEL_CHARS) {
            // Cannot overflow: 10 chars never exceed 40 bytes
            let _ = inner.push(ch);
        }
        Label(inner)
    }

    /// The "Offline" indicator
    pub fn offline() -> Self {
        Self::new(OFFLINE_TEXT)
    }

    /// The startup "Ready" text
    pub fn ready() -> Self {
        Self::new(READY_TEXT)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Number of characters (not bytes)
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl Deref for Label {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({:?})", self.as_str())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Label {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}
