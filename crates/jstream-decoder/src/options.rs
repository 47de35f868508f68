/// Default capacity of the `BufReader` built by
/// [`decode_reader`](crate::decode_reader).
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Optional limits for a decode call.
///
/// [`decode`](crate::decode) uses [`DecodeOptions::default`], which imposes
/// no limits at all. Callers reading untrusted input can cap the size of a
/// single record so one enormous element cannot force an unbounded
/// allocation.
///
/// ```text
/// ┌──────────────────┬─────────────────────────────────────────────┐
/// │ Field            │ Purpose                                     │
/// ├──────────────────┼─────────────────────────────────────────────┤
/// │ max_record_len   │ Byte cap per record (None = unbounded)      │
/// │ buffer_capacity  │ BufReader size used when wrapping a Read    │
/// └──────────────────┴─────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject any single record longer than this many bytes.
    pub max_record_len: Option<usize>,

    /// Buffer size for
    /// [`decode_reader_with_options`](crate::decode_reader_with_options).
    /// Ignored when the caller passes its own `BufRead`. Zero is read as one.
    pub buffer_capacity: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_record_len: None,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub fn with_max_record_len(mut self, limit: usize) -> Self {
        self.max_record_len = Some(limit);
        self
    }

    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }
}
