/// Errors raised while pulling raw bytes off a [`ByteSource`](crate::ByteSource).
///
/// Every structural variant carries the absolute byte offset (counted from
/// the first byte the source ever yielded) where the problem was detected,
/// so a failure deep inside a multi-gigabyte stream can still be located.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended in the middle of a value (open string, unclosed bracket)
    /// or while a container still expected more tokens.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: u64 },

    /// A byte that cannot appear at this position.
    ///
    /// `expected` is a short human description of what would have been
    /// accepted, e.g. `"a JSON value"` or `"',' or ']'"`.
    #[error("unexpected byte {byte:#04x} at offset {offset}, expected {expected}")]
    UnexpectedByte {
        byte: u8,
        offset: u64,
        expected: &'static str,
    },

    /// A `]` closed a `{`, or a `}` closed a `[`, or a closer appeared with
    /// nothing open.
    #[error("mismatched closing byte {byte:#04x} at offset {offset}")]
    MismatchedClose { byte: u8, offset: u64 },

    /// A single value grew past the configured size limit before it ended.
    #[error("record at offset {offset} exceeds the {limit}-byte limit")]
    RecordTooLarge { limit: usize, offset: u64 },

    /// Transport failure from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

