/// Implementation of `jstream validate`.
///
/// Decodes the entire input and prints either a success report or a single
/// diagnostic line. The process exits with code 0 on a valid stream and
/// code 1 otherwise.
///
/// # Success output
///
/// ```text
/// ✓ Records: 3 records decoded
/// ✓ Bytes: 57 bytes consumed
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Malformed: expected an array or an object at offset 12, found byte 0x78
/// ```
use anyhow::{Result, anyhow};
use jstream_decoder::{DecodeError, DecodeOptions, ErrorCategory, RecordStream};

use crate::InputArgs;
use crate::input;

/// Run the `jstream validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or fails to decode.
pub fn run(args: &InputArgs, options: DecodeOptions) -> Result<()> {
    let input = input::open(args, options.buffer_capacity)?;
    let mut stream = RecordStream::with_options(input.reader, options);

    let failure = (&mut stream).find_map(Result::err);

    match failure {
        None => {
            let records = stream.records_read();
            println!(
                "✓ Records: {records} record{} decoded",
                if records == 1 { "" } else { "s" }
            );
            println!("✓ Bytes: {} bytes consumed", stream.offset());
            Ok(())
        }
        Some(e) => {
            println!("✗ {}", diagnostic(&e));
            Err(anyhow!("{} is not a valid record stream", input.name))
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// One-line diagnostic, prefixed with the error category.
fn diagnostic(e: &DecodeError) -> String {
    let label = match e.category() {
        ErrorCategory::Io => "I/O",
        ErrorCategory::Malformed => "Malformed",
        ErrorCategory::Handler => "Rejected",
    };
    format!("{label}: {e}")
}
