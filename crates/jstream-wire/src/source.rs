use std::io::{BufRead, ErrorKind};

use crate::error::WireError;

/// Insignificant whitespace between JSON tokens (RFC 8259 §2).
#[must_use]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Forward-only byte source with one byte of lookahead.
///
/// Wraps any [`BufRead`] and exposes the handful of primitives the record
/// decoder needs: peek the next byte without consuming it, consume bytes,
/// skip whitespace, and walk the internal buffer chunk by chunk. The
/// lookahead is the reader's own buffer (`fill_buf`), so peeking never
/// copies and never loses a byte.
///
/// ```text
///   consumed            buffered (peekable)       not yet read
///   ◄──────────────────┬─────────────────────────┬──────────────►
///                   offset()
/// ```
///
/// `offset` counts every byte consumed since construction and is the
/// position reported in error messages.
///
/// [`ErrorKind::Interrupted`] is retried transparently. Any other I/O
/// error surfaces as [`WireError::Io`]; clean end-of-input is reported as
/// `None` by [`peek`](Self::peek), never as an error.
pub struct ByteSource<R> {
    reader: R,
    offset: u64,
}

impl<R: BufRead> ByteSource<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Return the wrapped reader. Bytes still sitting in its buffer stay
    /// there and are visible to the next consumer.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Look at the next byte without consuming it.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the reader fails.
    pub fn peek(&mut self) -> Result<Option<u8>, WireError> {
        self.with_chunk(|chunk| (0, chunk.first().copied()))
    }

    /// Consume `n` bytes that have already been observed via
    /// [`peek`](Self::peek) or [`with_chunk`](Self::with_chunk).
    pub fn consume(&mut self, n: usize) {
        self.reader.consume(n);
        self.offset += n as u64;
    }

    /// Consume exactly one previously peeked byte.
    pub fn bump(&mut self) {
        self.consume(1);
    }

    /// Skip whitespace and return the first significant byte, unconsumed.
    ///
    /// Returns `Ok(None)` if the input ends before a significant byte is
    /// found. Whitespace-only input is therefore indistinguishable from
    /// empty input.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the reader fails.
    pub fn skip_whitespace(&mut self) -> Result<Option<u8>, WireError> {
        loop {
            let (found, exhausted) = self.with_chunk(|chunk| {
                let skip = chunk.iter().take_while(|b| is_whitespace(**b)).count();
                (skip, (chunk.get(skip).copied(), chunk.is_empty()))
            })?;

            if found.is_some() || exhausted {
                return Ok(found);
            }
        }
    }

    /// Run `f` over the currently buffered bytes, refilling first if the
    /// buffer is empty.
    ///
    /// `f` returns how many leading bytes of the chunk to consume along
    /// with its own result. An empty chunk means end of input. The chunk
    /// never outlives the call, which keeps the borrow of the reader local.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the reader fails with anything other
    /// than [`ErrorKind::Interrupted`].
    pub fn with_chunk<T, F>(&mut self, mut f: F) -> Result<T, WireError>
    where
        F: FnMut(&[u8]) -> (usize, T),
    {
        loop {
            match self.reader.fill_buf() {
                Ok(chunk) => {
                    let (used, out) = f(chunk);
                    debug_assert!(used <= chunk.len());
                    self.consume(used);
                    return Ok(out);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(WireError::Io(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Read};

    /// Reader that yields one byte per `read` call and interrupts every
    /// other call.
    struct Stuttering<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Stuttering<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            if self.data.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[0];
            self.data = &self.data[1..];
            Ok(1)
        }
    }

    #[test]
    fn peek_does_not_consume() {
        let mut src = ByteSource::new(&b"ab"[..]);
        assert_eq!(src.peek().unwrap(), Some(b'a'));
        assert_eq!(src.peek().unwrap(), Some(b'a'));
        assert_eq!(src.offset(), 0);

        src.bump();
        assert_eq!(src.peek().unwrap(), Some(b'b'));
        assert_eq!(src.offset(), 1);
    }

    #[test]
    fn peek_on_empty_input_is_none() {
        let mut src = ByteSource::new(&b""[..]);
        assert_eq!(src.peek().unwrap(), None);
    }

    #[test]
    fn skip_whitespace_stops_at_significant_byte() {
        let mut src = ByteSource::new(&b" \t\r\n [1]"[..]);
        assert_eq!(src.skip_whitespace().unwrap(), Some(b'['));
        assert_eq!(src.offset(), 5);
    }

    #[test]
    fn skip_whitespace_only_input_is_none() {
        let mut src = ByteSource::new(&b"   \n\n"[..]);
        assert_eq!(src.skip_whitespace().unwrap(), None);
        assert_eq!(src.offset(), 5);
    }

    #[test]
    fn skip_whitespace_spans_buffer_refills() {
        let reader = BufReader::with_capacity(2, &b"      {}"[..]);
        let mut src = ByteSource::new(reader);
        assert_eq!(src.skip_whitespace().unwrap(), Some(b'{'));
        assert_eq!(src.offset(), 6);
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let reader = BufReader::new(Stuttering {
            data: b"  x",
            interrupt: false,
        });
        let mut src = ByteSource::new(reader);
        assert_eq!(src.skip_whitespace().unwrap(), Some(b'x'));
    }

    #[test]
    fn hard_errors_surface_as_io() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::ConnectionReset, "peer went away"))
            }
        }

        let mut src = ByteSource::new(BufReader::new(Broken));
        let err = src.peek().unwrap_err();
        assert!(matches!(err, WireError::Io(ref e) if e.kind() == ErrorKind::ConnectionReset));
    }
}
