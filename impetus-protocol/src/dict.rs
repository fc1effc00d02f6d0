//! Key/value dictionary payloads
//!
//! Every message exchanged with the phone is a small dictionary of tuples,
//! the same shape the phone SDK's app-message API produces:
//!
//! ```text
//! ┌───────┬──────────────────────────────────────────────┐
//! │ COUNT │ TUPLE × COUNT                                │
//! │ 1B    │ KEY (u32 LE) │ TYPE │ LEN (u16 LE) │ VALUE   │
//! └───────┴──────────────────────────────────────────────┘
//! ```
//!
//! - TYPE 0: raw bytes
//! - TYPE 1: C string, NUL terminated (the NUL is optional when reading)
//! - TYPE 2: unsigned integer, 1/2/4 bytes little endian
//! - TYPE 3: signed integer, 1/2/4 bytes little endian

use heapless::Vec;

use crate::frame::MAX_PAYLOAD_SIZE;

pub const TYPE_BYTES: u8 = 0;
pub const TYPE_CSTRING: u8 = 1;
pub const TYPE_UINT: u8 = 2;
pub const TYPE_INT: u8 = 3;

/// KEY + TYPE + LEN
const TUPLE_HEADER_SIZE: usize = 4 + 1 + 2;

/// Errors while reading or writing a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictError {
    /// Input ended in the middle of a tuple
    Truncated,
    /// Tuple type byte not recognised
    UnknownType,
    /// Integer tuple with a width other than 1, 2 or 4
    BadLength,
    /// String tuple is not valid UTF-8
    InvalidUtf8,
    /// Output buffer or tuple count exhausted
    Overflow,
}

/// A decoded tuple value borrowing from the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Bytes(&'a [u8]),
    Str(&'a str),
    Uint(u32),
    Int(i32),
}

impl<'a> Value<'a> {
    /// Integer view; negative signed values have no unsigned reading
    pub fn as_uint(&self) -> Option<u32> {
        match *self {
            Value::Uint(v) => Some(v),
            Value::Int(v) if v >= 0 => Some(v as u32),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// One key/value pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuple<'a> {
    pub key: u32,
    pub value: Value<'a>,
}

/// Iterator over the tuples of an encoded dictionary
///
/// Stops after the first error; everything decoded before it stays valid.
#[derive(Debug, Clone)]
pub struct DictReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    remaining: u8,
    failed: bool,
}

impl<'a> DictReader<'a> {
    /// Start reading a dictionary
    pub fn new(bytes: &'a [u8]) -> Result<Self, DictError> {
        let (&count, _) = bytes.split_first().ok_or(DictError::Truncated)?;
        Ok(Self {
            bytes,
            pos: 1,
            remaining: count,
            failed: false,
        })
    }

    /// Tuple count announced in the header
    pub fn declared_len(&self) -> u8 {
        self.bytes[0]
    }

    /// First well-formed value stored under `key`
    pub fn find(&self, key: u32) -> Option<Value<'a>> {
        self.clone()
            .map_while(Result::ok)
            .find(|t| t.key == key)
            .map(|t| t.value)
    }

    fn read_tuple(&mut self) -> Result<Tuple<'a>, DictError> {
        let rest = &self.bytes[self.pos..];
        if rest.len() < TUPLE_HEADER_SIZE {
            return Err(DictError::Truncated);
        }

        let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
        let ty = rest[4];
        let len = u16::from_le_bytes([rest[5], rest[6]]) as usize;

        let data = rest
            .get(TUPLE_HEADER_SIZE..TUPLE_HEADER_SIZE + len)
            .ok_or(DictError::Truncated)?;
        let value = decode_value(ty, data)?;

        self.pos += TUPLE_HEADER_SIZE + len;
        Ok(Tuple { key, value })
    }
}

impl<'a> Iterator for DictReader<'a> {
    type Item = Result<Tuple<'a>, DictError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let tuple = self.read_tuple();
        if tuple.is_err() {
            self.failed = true;
        }
        Some(tuple)
    }
}

fn decode_value(ty: u8, data: &[u8]) -> Result<Value<'_>, DictError> {
    match ty {
        TYPE_BYTES => Ok(Value::Bytes(data)),
        TYPE_CSTRING => {
            let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
            core::str::from_utf8(&data[..end])
                .map(Value::Str)
                .map_err(|_| DictError::InvalidUtf8)
        }
        TYPE_UINT => match *data {
            [b0] => Ok(Value::Uint(b0 as u32)),
            [b0, b1] => Ok(Value::Uint(u16::from_le_bytes([b0, b1]) as u32)),
            [b0, b1, b2, b3] => Ok(Value::Uint(u32::from_le_bytes([b0, b1, b2, b3]))),
            _ => Err(DictError::BadLength),
        },
        TYPE_INT => match *data {
            [b0] => Ok(Value::Int(b0 as i8 as i32)),
            [b0, b1] => Ok(Value::Int(i16::from_le_bytes([b0, b1]) as i32)),
            [b0, b1, b2, b3] => Ok(Value::Int(i32::from_le_bytes([b0, b1, b2, b3]))),
            _ => Err(DictError::BadLength),
        },
        _ => Err(DictError::UnknownType),
    }
}

/// Builds an encoded dictionary in a fixed-size buffer
#[derive(Debug, Clone)]
pub struct DictWriter {
    buf: Vec<u8, MAX_PAYLOAD_SIZE>,
    count: u8,
}

impl Default for DictWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DictWriter {
    pub fn new() -> Self {
        let mut buf = Vec::new();
        // Count placeholder, patched in finish()
        let _ = buf.push(0);
        Self { buf, count: 0 }
    }

    /// Append a one-byte unsigned integer (the width command codes use)
    pub fn push_u8(&mut self, key: u32, value: u8) -> Result<(), DictError> {
        self.push_tuple(key, TYPE_UINT, &[value])
    }

    pub fn push_uint(&mut self, key: u32, value: u32) -> Result<(), DictError> {
        self.push_tuple(key, TYPE_UINT, &value.to_le_bytes())
    }

    pub fn push_int(&mut self, key: u32, value: i32) -> Result<(), DictError> {
        self.push_tuple(key, TYPE_INT, &value.to_le_bytes())
    }

    /// Append a NUL terminated string
    pub fn push_str(&mut self, key: u32, value: &str) -> Result<(), DictError> {
        let len = value.len() + 1;
        self.push_header(key, TYPE_CSTRING, len)?;
        self.buf
            .extend_from_slice(value.as_bytes())
            .map_err(|_| DictError::Overflow)?;
        self.buf.push(0).map_err(|_| DictError::Overflow)
    }

    pub fn push_bytes(&mut self, key: u32, value: &[u8]) -> Result<(), DictError> {
        self.push_tuple(key, TYPE_BYTES, value)
    }

    /// Number of tuples written so far
    pub fn len(&self) -> u8 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Finish the dictionary and return its encoded bytes
    pub fn finish(mut self) -> Vec<u8, MAX_PAYLOAD_SIZE> {
        self.buf[0] = self.count;
        self.buf
    }

    fn push_tuple(&mut self, key: u32, ty: u8, data: &[u8]) -> Result<(), DictError> {
        self.push_header(key, ty, data.len())?;
        self.buf
            .extend_from_slice(data)
            .map_err(|_| DictError::Overflow)
    }

    fn push_header(&mut self, key: u32, ty: u8, len: usize) -> Result<(), DictError> {
        if self.count == u8::MAX {
            return Err(DictError::Overflow);
        }
        // Reject up front so a failed push never leaves half a tuple behind
        if self.buf.len() + TUPLE_HEADER_SIZE + len > MAX_PAYLOAD_SIZE {
            return Err(DictError::Overflow);
        }
        let len = u16::try_from(len).map_err(|_| DictError::Overflow)?;

        self.buf
            .extend_from_slice(&key.to_le_bytes())
            .map_err(|_| DictError::Overflow)?;
        self.buf.push(ty).map_err(|_| DictError::Overflow)?;
        self.buf
            .extend_from_slice(&len.to_le_bytes())
            .map_err(|_| DictError::Overflow)?;
        self.count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_write_command_dictionary() {
        let mut w = DictWriter::new();
        w.push_u8(0, 3).unwrap();
        let bytes = w.finish();

        assert_eq!(&bytes[..], &[1, 0, 0, 0, 0, TYPE_UINT, 1, 0, 3]);
    }

    #[test]
    fn test_read_mixed_dictionary() {
        let mut w = DictWriter::new();
        w.push_uint(4, 90).unwrap();
        w.push_str(1, "Work").unwrap();
        w.push_int(9, -5).unwrap();
        let bytes = w.finish();

        let reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.declared_len(), 3);
        assert_eq!(reader.find(4), Some(Value::Uint(90)));
        assert_eq!(reader.find(1), Some(Value::Str("Work")));
        assert_eq!(reader.find(9), Some(Value::Int(-5)));
        assert_eq!(reader.find(7), None);
    }

    #[test]
    fn test_integer_widths() {
        // count=3: u8, u16 and i16 tuples
        let bytes = [
            3, //
            1, 0, 0, 0, TYPE_UINT, 1, 0, 0xFF, //
            2, 0, 0, 0, TYPE_UINT, 2, 0, 0x2C, 0x01, //
            3, 0, 0, 0, TYPE_INT, 2, 0, 0xFE, 0xFF,
        ];
        let reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.find(1), Some(Value::Uint(255)));
        assert_eq!(reader.find(2), Some(Value::Uint(300)));
        assert_eq!(reader.find(3), Some(Value::Int(-2)));
    }

    #[test]
    fn test_cstring_without_nul() {
        let bytes = [1, 5, 0, 0, 0, TYPE_CSTRING, 3, 0, b'A', b'B', b'C'];
        let reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.find(5), Some(Value::Str("ABC")));
    }

    #[test]
    fn test_truncated_tuple() {
        let bytes = [1, 4, 0, 0, 0, TYPE_UINT, 4, 0, 1, 2];
        let mut reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.next(), Some(Err(DictError::Truncated)));
        assert_eq!(reader.next(), None);
    }

    #[test]
    fn test_bad_integer_width() {
        let bytes = [1, 4, 0, 0, 0, TYPE_UINT, 3, 0, 1, 2, 3];
        let mut reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.next(), Some(Err(DictError::BadLength)));
    }

    #[test]
    fn test_unknown_type() {
        let bytes = [1, 4, 0, 0, 0, 0x7F, 0, 0];
        let mut reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.next(), Some(Err(DictError::UnknownType)));
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes = [1, 1, 0, 0, 0, TYPE_CSTRING, 2, 0, 0xC3, 0x28];
        let mut reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.next(), Some(Err(DictError::InvalidUtf8)));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(DictReader::new(&[]).err(), Some(DictError::Truncated));
    }

    #[test]
    fn test_find_keeps_values_before_error() {
        let mut w = DictWriter::new();
        w.push_uint(4, 30).unwrap();
        let mut bytes = w.finish();
        // Claim a second tuple that is not there
        bytes[0] = 2;

        let reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.find(4), Some(Value::Uint(30)));
    }

    #[test]
    fn test_writer_overflow_leaves_buffer_intact() {
        let mut w = DictWriter::new();
        let big = [0u8; MAX_PAYLOAD_SIZE];
        assert_eq!(w.push_bytes(1, &big), Err(DictError::Overflow));
        assert!(w.is_empty());

        w.push_u8(0, 1).unwrap();
        let bytes = w.finish();
        let mut reader = DictReader::new(&bytes).unwrap();
        assert_eq!(
            reader.next(),
            Some(Ok(Tuple {
                key: 0,
                value: Value::Uint(1)
            }))
        );
        assert_eq!(reader.next(), None);
    }

    #[test]
    fn test_value_views() {
        assert_eq!(Value::Uint(7).as_uint(), Some(7));
        assert_eq!(Value::Int(7).as_uint(), Some(7));
        assert_eq!(Value::Int(-1).as_uint(), None);
        assert_eq!(Value::Str("x").as_uint(), None);
        assert_eq!(Value::Str("x").as_str(), Some("x"));
        assert_eq!(Value::Uint(1).as_str(), None);
    }

    proptest! {
        #[test]
        fn prop_reader_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            if let Ok(reader) = DictReader::new(&bytes) {
                for tuple in reader {
                    let _ = tuple;
                }
            }
        }
    }
}
