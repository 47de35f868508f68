use std::io::{BufRead, BufReader, Read};

use tracing::{debug, warn};

use crate::error::{DecodeError, HandlerError};
use crate::options::DecodeOptions;
use crate::record::RawRecord;
use crate::stream::RecordStream;

/// Decode every record in `source` and hand each one to `handler`.
///
/// The stream may be a single JSON object, an array of records, or any
/// back-to-back concatenation of objects and arrays, with or without
/// whitespace in between. The shape is sniffed from the first significant
/// byte of each top-level structure; the caller never has to say which
/// one to expect.
///
/// ```text
///   input                         handler calls
///   ───────────────────────────   ───────────────────────
///   (empty)                       none
///   {"a":1}                       {"a":1}
///   [A, B, C]                     A, B, C
///   [A,B][C]                      A, B, C
///   {"a":1}{"b":2}                {"a":1}, {"b":2}
/// ```
///
/// The handler runs synchronously, once per record, in stream order. The
/// first decode error or handler error aborts the call; records already
/// dispatched stay dispatched and the rest of the input is left unread.
///
/// # Errors
///
/// - [`DecodeError::Io`] if `source` fails.
/// - [`DecodeError::UnexpectedByte`], [`DecodeError::Wire`],
///   [`DecodeError::InvalidRecord`], [`DecodeError::InvalidUtf8`] for
///   malformed input.
/// - [`DecodeError::Handler`] if `handler` returns an error.
///
/// # Example
///
/// ```rust
/// let mut seen = Vec::new();
/// jstream_decoder::decode(&b"[1, 2.50, \"three\"]"[..], |record| {
///     seen.push(record.to_string());
///     Ok::<_, std::convert::Infallible>(())
/// })
/// .unwrap();
///
/// assert_eq!(seen, ["1", "2.50", "\"three\""]);
/// ```
pub fn decode<R, F, E>(source: R, handler: F) -> Result<(), DecodeError>
where
    R: BufRead,
    F: FnMut(RawRecord) -> Result<(), E>,
    E: Into<HandlerError>,
{
    decode_with_options(source, DecodeOptions::default(), handler)
}

/// Like [`decode`], for an unbuffered [`Read`].
///
/// Wraps `source` in a `BufReader` of the default capacity. Bytes the
/// buffer read ahead past the last consumed structure are discarded with
/// it.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_reader<R, F, E>(source: R, handler: F) -> Result<(), DecodeError>
where
    R: Read,
    F: FnMut(RawRecord) -> Result<(), E>,
    E: Into<HandlerError>,
{
    decode_reader_with_options(source, DecodeOptions::default(), handler)
}

/// Like [`decode_reader`], with the `BufReader` sized by
/// [`DecodeOptions::buffer_capacity`].
///
/// # Errors
///
/// Same as [`decode_with_options`].
pub fn decode_reader_with_options<R, F, E>(
    source: R,
    options: DecodeOptions,
    handler: F,
) -> Result<(), DecodeError>
where
    R: Read,
    F: FnMut(RawRecord) -> Result<(), E>,
    E: Into<HandlerError>,
{
    let reader = BufReader::with_capacity(options.buffer_capacity.max(1), source);
    decode_with_options(reader, options, handler)
}

/// Like [`decode`], with explicit [`DecodeOptions`].
///
/// # Errors
///
/// Same as [`decode`], plus [`DecodeError::Wire`] holding
/// `WireError::RecordTooLarge` when a record exceeds
/// [`DecodeOptions::max_record_len`].
pub fn decode_with_options<R, F, E>(
    source: R,
    options: DecodeOptions,
    mut handler: F,
) -> Result<(), DecodeError>
where
    R: BufRead,
    F: FnMut(RawRecord) -> Result<(), E>,
    E: Into<HandlerError>,
{
    let mut stream = RecordStream::with_options(source, options);
    let mut index = 0u64;

    for record in &mut stream {
        if let Err(e) = handler(record?) {
            let source: HandlerError = e.into();
            warn!(index, error = %source, "handler rejected record");
            return Err(DecodeError::Handler { index, source });
        }
        index += 1;
    }

    debug!(records = index, bytes = stream.offset(), "decode complete");
    Ok(())
}
