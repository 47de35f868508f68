/// Implementation of `jstream count`.
///
/// Prints the number of records in the input as a bare integer, so the
/// output can be captured directly by a shell script.
use anyhow::{Context, Result};
use jstream_decoder::{DecodeOptions, RecordStream};

use crate::InputArgs;
use crate::input;

/// Run the `jstream count` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or is malformed. No
/// partial count is printed on failure.
pub fn run(args: &InputArgs, options: DecodeOptions) -> Result<()> {
    let input = input::open(args, options.buffer_capacity)?;
    let mut stream = RecordStream::with_options(input.reader, options);

    for record in &mut stream {
        record.with_context(|| format!("failed to decode {}", input.name))?;
    }

    println!("{}", stream.records_read());
    Ok(())
}
