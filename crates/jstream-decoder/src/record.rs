use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

/// One decoded record: a validated, verbatim chunk of JSON text.
///
/// The decoder never interprets record contents. A `RawRecord` holds the
/// exact bytes of one array element or one top-level object as they
/// appeared in the stream, after checking that they form a single
/// well-formed JSON value. Number literals in particular are never
/// rounded or reformatted:
///
/// ```text
///   wire:    [ {"price": 0.1000000000000000055511151231257827} ]
///   record:    {"price": 0.1000000000000000055511151231257827}
/// ```
///
/// Call [`parse`](Self::parse) to deserialize into a domain type when the
/// handler actually needs to look inside.
#[derive(Clone, Debug)]
pub struct RawRecord {
    raw: Box<RawValue>,
    offset: u64,
}

/// The JSON type of a record, read from its first byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl RawRecord {
    pub(crate) fn new(raw: Box<RawValue>, offset: u64) -> Self {
        Self { raw, offset }
    }

    /// The record's JSON text, exactly as it appeared in the stream.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.raw.get()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }

    /// Length of the JSON text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    /// Always `false`; a valid JSON value is at least one byte. Provided
    /// alongside [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Absolute byte offset of the record's first byte in the stream.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self.as_bytes().first() {
            Some(b'{') => RecordKind::Object,
            Some(b'[') => RecordKind::Array,
            Some(b'"') => RecordKind::String,
            Some(b't' | b'f') => RecordKind::Bool,
            Some(b'n') => RecordKind::Null,
            _ => RecordKind::Number,
        }
    }

    /// Deserialize the record into `T`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the record does not match `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.as_str())
    }

    /// Give up the wrapper and keep the underlying raw JSON value.
    #[must_use]
    pub fn into_raw(self) -> Box<RawValue> {
        self.raw
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}

/// Two records are equal when their text is identical; the offset is
/// ignored.
impl PartialEq for RawRecord {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for RawRecord {}

impl PartialEq<str> for RawRecord {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RawRecord {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Serializes the original text verbatim, so re-encoding a record with
/// `serde_json` reproduces it byte for byte.
impl Serialize for RawRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
