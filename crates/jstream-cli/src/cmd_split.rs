/// Implementation of `jstream split`.
///
/// Decodes the input and writes each record on its own line, producing
/// newline-delimited JSON regardless of the input's top-level shape:
///
/// ```text
///   input                          output
///   ─────────────────────────      ─────────────
///   [{"a":1},{"a":2}]              {"a":1}
///   {"a":3}                        {"a":2}
///                                  {"a":3}
/// ```
///
/// Records are written verbatim. A pretty-printed record keeps its line
/// breaks unless `--compact` is given, in which case whitespace outside
/// string literals is dropped; every other byte, number literals included,
/// is kept as written.
use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use jstream_decoder::{DecodeOptions, decode_with_options};

use crate::SplitArgs;
use crate::input;

/// Run the `jstream split` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or decoded, or if the
/// output cannot be written.
pub fn run(args: &SplitArgs, options: DecodeOptions) -> Result<()> {
    let input = input::open(&args.input, options.buffer_capacity)?;

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(sink);
    let mut line = String::new();

    decode_with_options(input.reader, options, |record| {
        let text = if args.compact {
            line.clear();
            compact_into(record.as_str(), &mut line);
            line.as_str()
        } else {
            record.as_str()
        };
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")
    })
    .with_context(|| format!("failed to split {}", input.name))?;

    out.flush().context("failed to flush output")?;
    Ok(())
}

/// Append `json` to `out` with insignificant whitespace removed.
///
/// Whitespace inside string literals (and escaped quotes) is preserved.
pub fn compact_into(json: &str, out: &mut String) {
    let mut in_string = false;
    let mut escaped = false;

    for ch in json.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if matches!(ch, ' ' | '\t' | '\n' | '\r') {
            continue;
        }
        out.push(ch);
    }
}
