use std::io::BufRead;

use jstream_wire::{ByteSource, WireError, scan_value};
use serde_json::value::RawValue;
use tracing::{debug, trace, warn};

use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::record::RawRecord;

/// Where the decoder stands relative to the top-level structures.
///
/// ```text
///                  ┌────────── '[' ──────────► InArray ─── ']' ───┐
///                  │                                              │
///   Boundary ──────┼────────── '{' ──────────► InObjectStream ────┤
///      ▲           │                           (one value)        │
///      │           └── end of input ─► Done ◄── any error         │
///      └──────────────────────────────────────────────────────────┘
/// ```
///
/// `InArray` and `InObjectStream` are never entered from one another:
/// every structure returns to `Boundary` first, which is where
/// back-to-back concatenated structures are detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
  /// Between top-level structures, about to classify the next one.
  Boundary,
  /// Inside a top-level array. `first` is true until an element (or the
  /// closing bracket) has been read.
  InArray { first: bool },
  /// At the start of one bare top-level object.
  InObjectStream,
  /// Input exhausted or a terminal error was returned.
  Done,
}

/// Pull-style record decoder.
///
/// Iterates over every record in a stream that is a single object, an
/// array of records, or any back-to-back concatenation of those, without
/// buffering more than the record currently being decoded.
///
/// Each `next` call does only as much work as needed to produce one
/// record, so dropping the iterator early leaves the rest of the input
/// unread. After the first error the iterator yields `None`.
///
/// # Example
///
/// ```rust
/// use jstream_decoder::RecordStream;
///
/// let input = br#"[{"id":1},{"id":2}] {"id":3}"#;
/// let ids: Vec<String> = RecordStream::new(&input[..])
///   .map(|r| r.map(|rec| rec.to_string()))
///   .collect::<Result<_, _>>()
///   .unwrap();
///
/// assert_eq!(ids, [r#"{"id":1}"#, r#"{"id":2}"#, r#"{"id":3}"#]);
/// ```
pub struct RecordStream<R> {
  source: ByteSource<R>,
  cursor: Cursor,
  options: DecodeOptions,
  records: u64,
}

impl<R: BufRead> RecordStream<R> {
  /// Create a stream over `reader` with no limits.
  #[must_use]
  pub fn new(reader: R) -> Self {
    Self::with_options(reader, DecodeOptions::default())
  }

  #[must_use]
  pub fn with_options(reader: R, options: DecodeOptions) -> Self {
    Self {
      source: ByteSource::new(reader),
      cursor: Cursor::Boundary,
      options,
      records: 0,
    }
  }

  #[must_use]
  pub fn cursor(&self) -> Cursor {
    self.cursor
  }

  /// Bytes consumed from the reader so far.
  #[must_use]
  pub fn offset(&self) -> u64 {
    self.source.offset()
  }

  /// Number of records yielded so far.
  #[must_use]
  pub fn records_read(&self) -> u64 {
    self.records
  }

  /// Return the underlying reader, positioned just after the last byte
  /// this stream consumed.
  pub fn into_inner(self) -> R {
    self.source.into_inner()
  }

  /// Advance the state machine until it produces a record or ends.
  fn advance(&mut self) -> Result<Option<RawRecord>, DecodeError> {
    loop {
      match self.cursor {
        Cursor::Done => return Ok(None),
        Cursor::Boundary => self.classify()?,
        Cursor::InObjectStream => {
          let record = self.read_record()?;
          self.cursor = Cursor::Boundary;
          return Ok(Some(record));
        }
        Cursor::InArray { first } => {
          if let Some(record) = self.next_element(first)? {
            self.cursor = Cursor::InArray { first: false };
            return Ok(Some(record));
          }
          self.cursor = Cursor::Boundary;
        }
      }
    }
  }

  /// Look at the next significant byte and pick the mode for the
  /// structure that starts there.
  fn classify(&mut self) -> Result<(), DecodeError> {
    let next = self.source.skip_whitespace()?;
    let offset = self.source.offset();

    match next {
      None => {
        debug!(records = self.records, offset, "end of stream");
        self.cursor = Cursor::Done;
      }
      Some(b'[') => {
        debug!(offset, "array of records");
        self.source.bump();
        self.cursor = Cursor::InArray { first: true };
      }
      Some(b'{') => {
        debug!(offset, "bare object");
        self.cursor = Cursor::InObjectStream;
      }
      Some(byte) => return Err(DecodeError::UnexpectedByte { byte, offset }),
    }
    Ok(())
  }

  /// Read the next element of the open array, or consume the closing
  /// bracket and return `None`.
  fn next_element(&mut self, first: bool) -> Result<Option<RawRecord>, DecodeError> {
    let next = self.expect_more()?;

    if first {
      if next == b']' {
        self.source.bump();
        return Ok(None);
      }
    } else {
      match next {
        b',' => {
          self.source.bump();
          // A value is mandatory after a comma; `[1,]` fails in the scanner.
          self.expect_more()?;
        }
        b']' => {
          self.source.bump();
          return Ok(None);
        }
        byte => {
          return Err(
            WireError::UnexpectedByte {
              byte,
              offset: self.source.offset(),
              expected: "',' or ']'",
            }
            .into(),
          );
        }
      }
    }

    self.read_record().map(Some)
  }

  /// Skip whitespace inside an open array; running out of input here
  /// means the array was never closed.
  fn expect_more(&mut self) -> Result<u8, DecodeError> {
    match self.source.skip_whitespace()? {
      Some(byte) => Ok(byte),
      None => Err(
        WireError::UnexpectedEof {
          offset: self.source.offset(),
        }
        .into(),
      ),
    }
  }

  /// Scan one complete value, validate it, and wrap it as a record.
  fn read_record(&mut self) -> Result<RawRecord, DecodeError> {
    let offset = self.source.offset();
    let mut buf = Vec::new();
    scan_value(&mut self.source, &mut buf, self.options.max_record_len)?;

    let text = String::from_utf8(buf).map_err(|_| DecodeError::InvalidUtf8 { offset })?;
    let raw = RawValue::from_string(text)
      .map_err(|source| DecodeError::InvalidRecord { offset, source })?;

    let record = RawRecord::new(raw, offset);
    trace!(index = self.records, offset, len = record.len(), "record");
    self.records += 1;
    Ok(record)
  }
}

impl<R: BufRead> Iterator for RecordStream<R> {
  type Item = Result<RawRecord, DecodeError>;

  fn next(&mut self) -> Option<Self::Item> {
    match self.advance() {
      Ok(record) => record.map(Ok),
      Err(e) => {
        warn!(offset = self.source.offset(), error = %e, "record stream aborted");
        self.cursor = Cursor::Done;
        Some(Err(e))
      }
    }
  }
}

impl<R: BufRead> std::iter::FusedIterator for RecordStream<R> {}
