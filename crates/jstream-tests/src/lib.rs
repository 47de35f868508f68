//! Shared fixtures for the jstream integration tests and benchmarks.

use std::io::{self, BufReader, ErrorKind, Read};

use jstream_decoder::{DecodeError, decode};

/// Decode `input` and collect every record's text.
///
/// # Errors
///
/// Returns the first [`DecodeError`].
pub fn collect(input: &[u8]) -> Result<Vec<String>, DecodeError> {
    collect_from(input)
}

/// Same as [`collect`] over an arbitrary `BufRead`.
///
/// # Errors
///
/// Returns the first [`DecodeError`].
pub fn collect_from<R: io::BufRead>(reader: R) -> Result<Vec<String>, DecodeError> {
    let mut out = Vec::new();
    decode(reader, |record| {
        out.push(record.to_string());
        Ok::<_, io::Error>(())
    })?;
    Ok(out)
}

/// A `BufReader` with a tiny buffer, so every value straddles refills.
#[must_use]
pub fn tiny_buffer(input: &[u8], capacity: usize) -> BufReader<&[u8]> {
    BufReader::with_capacity(capacity, input)
}

/// Reader that serves `data` until `fail_at` bytes have been handed out,
/// then fails every read with `kind`.
pub struct FailingReader {
    data: Vec<u8>,
    pos: usize,
    fail_at: usize,
    kind: ErrorKind,
}

impl FailingReader {
    #[must_use]
    pub fn new(data: &[u8], fail_at: usize, kind: ErrorKind) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            fail_at,
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.fail_at {
            return Err(io::Error::new(self.kind, "injected read failure"));
        }
        let end = self.fail_at.min(self.data.len()).min(self.pos + buf.len());
        let n = end - self.pos;
        buf[..n].copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(n)
    }
}

/// Build a `[ {...}, {...}, ... ]` document with `count` small records.
#[must_use]
pub fn array_of_objects(count: usize) -> Vec<u8> {
    let mut out = b"[".to_vec();
    for i in 0..count {
        if i > 0 {
            out.push(b',');
        }
        out.extend_from_slice(
            format!(r#"{{"id":{i},"name":"item-{i}","price":{i}.99,"tags":["a","b"]}}"#).as_bytes(),
        );
    }
    out.push(b']');
    out
}

/// Build `count` small objects concatenated with newlines (NDJSON).
#[must_use]
pub fn concatenated_objects(count: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..count {
        out.extend_from_slice(format!(r#"{{"seq":{i},"ok":true}}"#).as_bytes());
        out.push(b'\n');
    }
    out
}
