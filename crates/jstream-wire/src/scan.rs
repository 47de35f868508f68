use std::io::BufRead;

use crate::error::WireError;
use crate::source::ByteSource;

/// How the value being scanned ends.
///
/// ```text
///   first byte      kind       ends after
///   ──────────      ────       ──────────────────────────────────
///   { or [          Nested     the closer that empties the stack
///   "               Nested     the closing unescaped quote
///   - 0-9 a-z ...   Scalar     the last scalar byte (not consumed:
///                              the delimiter belongs to the caller)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ValueKind {
    Nested,
    Scalar,
}

/// Bytes that may appear in a bare literal (`true`, `-1.5e10`, ...).
///
/// Deliberately permissive: `tru` or `1x` are accepted here and rejected
/// by the full JSON validator that runs on the scanned bytes afterwards.
fn is_scalar_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'+' | b'.')
}

/// Incremental bracket/string tracker for nested values.
#[derive(Default)]
struct Nesting {
    /// Expected closers, innermost last.
    closers: Vec<u8>,
    in_string: bool,
    escaped: bool,
}

impl Nesting {
    /// Feed one byte. Returns `Ok(true)` once the outermost value is closed.
    fn feed(&mut self, byte: u8, offset: u64) -> Result<bool, WireError> {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == b'"' {
                self.in_string = false;
            }
        } else {
            match byte {
                b'"' => self.in_string = true,
                b'{' => self.closers.push(b'}'),
                b'[' => self.closers.push(b']'),
                b'}' | b']' => {
                    if self.closers.pop() != Some(byte) {
                        return Err(WireError::MismatchedClose { byte, offset });
                    }
                }
                _ => {}
            }
        }

        Ok(!self.in_string && self.closers.is_empty())
    }
}

/// Copy exactly one JSON value from `src` into `out`.
///
/// This finds the *extent* of the value without interpreting it: brackets
/// are balanced, strings and escapes are skipped over, and a bare scalar
/// runs until the first byte that cannot belong to a literal. The bytes are
/// appended to `out` verbatim, numbers included, so a later validator sees
/// precisely what was on the wire.
///
/// Leading whitespace must already have been skipped. On success the source
/// is positioned on the first byte after the value.
///
/// `limit`, when set, caps the number of bytes this single value may
/// occupy.
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] if the input ends before the value is
///   complete (or before it starts).
/// - [`WireError::UnexpectedByte`] if the first byte cannot start a value.
/// - [`WireError::MismatchedClose`] if brackets do not pair up.
/// - [`WireError::RecordTooLarge`] if the value exceeds `limit`.
/// - [`WireError::Io`] if the reader fails.
pub fn scan_value<R: BufRead>(
    src: &mut ByteSource<R>,
    out: &mut Vec<u8>,
    limit: Option<usize>,
) -> Result<(), WireError> {
    let start = src.offset();
    let kind = match src.peek()? {
        None => return Err(WireError::UnexpectedEof { offset: start }),
        Some(b'{' | b'[' | b'"') => ValueKind::Nested,
        Some(byte) if is_scalar_byte(byte) => ValueKind::Scalar,
        Some(byte) => {
            return Err(WireError::UnexpectedByte {
                byte,
                offset: start,
                expected: "a JSON value",
            });
        }
    };

    let base_len = out.len();
    let mut nesting = Nesting::default();

    loop {
        let base = src.offset();
        let step = src.with_chunk(|chunk| {
            if chunk.is_empty() {
                return (0, Step::Eof);
            }

            let (used, step) = match kind {
                ValueKind::Scalar => match chunk.iter().position(|b| !is_scalar_byte(*b)) {
                    Some(end) => (end, Step::Done),
                    None => (chunk.len(), Step::More),
                },
                ValueKind::Nested => nested_step(&mut nesting, chunk, base),
            };

            out.extend_from_slice(&chunk[..used]);
            (used, step)
        })?;

        if let Some(limit) = limit
            && out.len() - base_len > limit
        {
            return Err(WireError::RecordTooLarge { limit, offset: start });
        }

        match step {
            Step::More => {}
            Step::Done => return Ok(()),
            Step::Eof if kind == ValueKind::Scalar => return Ok(()),
            Step::Eof => return Err(WireError::UnexpectedEof { offset: src.offset() }),
            Step::Failed(e) => return Err(e),
        }
    }
}

/// Outcome of scanning one buffered chunk.
enum Step {
    /// The chunk was consumed entirely and the value continues.
    More,
    /// The value ended inside the chunk.
    Done,
    /// The reader is exhausted.
    Eof,
    Failed(WireError),
}

fn nested_step(nesting: &mut Nesting, chunk: &[u8], base: u64) -> (usize, Step) {
    for (i, &byte) in chunk.iter().enumerate() {
        match nesting.feed(byte, base + i as u64) {
            Ok(true) => return (i + 1, Step::Done),
            Ok(false) => {}
            Err(e) => return (i, Step::Failed(e)),
        }
    }
    (chunk.len(), Step::More)
}
