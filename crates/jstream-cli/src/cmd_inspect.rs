/// Implementation of `jstream inspect`.
///
/// Prints one line per record with its index, JSON kind, byte offset,
/// length, and the first 60 characters of its text, followed by a totals
/// line:
///
/// ```text
/// $ echo '[{"name":"ab"},123]' | jstream inspect
/// Record 0: object @1 (13 bytes) {"name":"ab"}
/// Record 1: number @15 (3 bytes) 123
/// ---
/// 2 records, 20 bytes
/// ```
///
/// With `--show-body` the full record text follows on an indented line.
use anyhow::{Context, Result};
use jstream_decoder::{DecodeOptions, RawRecord, RecordStream};

use crate::InspectArgs;
use crate::input;

const PREVIEW_CHARS: usize = 60;

/// Run the `jstream inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or is malformed. Lines
/// for records decoded before the failure have already been printed.
pub fn run(args: &InspectArgs, options: DecodeOptions) -> Result<()> {
    let input = input::open(&args.input, options.buffer_capacity)?;
    let mut stream = RecordStream::with_options(input.reader, options);
    let mut index = 0u64;

    for record in &mut stream {
        let record = record.with_context(|| format!("failed to decode {}", input.name))?;
        println!("{}", summary_line(index, &record));
        if args.show_body {
            println!("         Body: {}", record.as_str());
        }
        index += 1;
    }

    println!("---");
    println!(
        "{index} record{}, {} bytes",
        if index == 1 { "" } else { "s" },
        stream.offset()
    );
    Ok(())
}

fn summary_line(index: u64, record: &RawRecord) -> String {
    format!(
        "Record {index}: {} @{} ({} bytes) {}",
        record.kind(),
        record.offset(),
        record.len(),
        preview(record.as_str())
    )
}

/// First [`PREVIEW_CHARS`] characters on one line, with an ellipsis when
/// truncated.
fn preview(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(PREVIEW_CHARS)
        .collect();
    let ellipsis = if text.chars().count() > PREVIEW_CHARS { "…" } else { "" };
    format!("{flat}{ellipsis}")
}
