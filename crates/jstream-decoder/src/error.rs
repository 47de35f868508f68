use jstream_wire::WireError;

/// Boxed error type a record handler may fail with.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that terminate a record stream.
///
/// Every variant is terminal: the stream stops at the first error and
/// nothing is retried. Unread input stays unread.
///
/// ```text
///   DecodeError                        category
///   ├── Io(std::io::Error)             Io        ← reader failed
///   ├── UnexpectedByte                 Malformed ← top level is not [ or {
///   ├── Wire(WireError)                Malformed ← bad structure inside a container
///   ├── InvalidRecord                  Malformed ← element failed JSON validation
///   ├── InvalidUtf8                    Malformed ← element bytes are not UTF-8
///   └── Handler                        Handler   ← caller's handler rejected a record
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The byte source failed with something other than clean end of input.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A top-level structure starts with a byte that is neither `[` nor `{`.
    ///
    /// Also raised for trailing non-whitespace bytes after a complete
    /// structure, since those are classified as the start of the next one.
    #[error("expected an array or an object at offset {offset}, found byte {byte:#04x}")]
    UnexpectedByte { byte: u8, offset: u64 },

    /// Structural failure while scanning inside a container: a missing
    /// comma, an unclosed bracket, truncated input, an oversized record.
    ///
    /// Never holds [`WireError::Io`]; I/O failures are lifted into
    /// [`DecodeError::Io`] on conversion.
    #[error(transparent)]
    Wire(WireError),

    /// The element's bytes were framed correctly but are not valid JSON
    /// (bad literal, bad number, bad escape, bad object key). Nesting depth
    /// is not limited.
    #[error("invalid JSON record at offset {offset}: {source}")]
    InvalidRecord {
        offset: u64,
        source: serde_json::Error,
    },

    /// The element's bytes are not valid UTF-8.
    #[error("record at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: u64 },

    /// The handler returned an error for the record at zero-based `index`.
    #[error("handler rejected record {index}: {source}")]
    Handler { index: u64, source: HandlerError },
}

/// Coarse classification of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport problem in the byte source.
    Io,
    /// Syntax or shape violation in the input.
    Malformed,
    /// The caller-supplied handler rejected a record.
    Handler,
}

impl DecodeError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::Io,
            Self::Handler { .. } => ErrorCategory::Handler,
            Self::UnexpectedByte { .. }
            | Self::Wire(_)
            | Self::InvalidRecord { .. }
            | Self::InvalidUtf8 { .. } => ErrorCategory::Malformed,
        }
    }

    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.category() == ErrorCategory::Malformed
    }
}

impl From<WireError> for DecodeError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::Io(e) => Self::Io(e),
            other => Self::Wire(other),
        }
    }
}
