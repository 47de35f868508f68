/// jstream command-line tool — split, count, validate, and inspect JSON
/// record streams without caring whether they are one object, an array of
/// records, or structures concatenated back to back.
///
/// # Command overview
///
/// ```text
/// jstream <COMMAND> [OPTIONS] [FILE]
///
/// Commands:
///   split      Write every record on its own line (NDJSON)
///   count      Print the number of records
///   validate   Decode the whole stream and report success or the first error
///   inspect    Print index, kind, offset, and size for every record
///   help       Print help information
///
/// Global options:
///   -v, --verbose              Log decoder activity to stderr
///   --max-record-bytes <N>     Reject any single record larger than N bytes
///   --buffer-bytes <N>         Read buffer size for file input [default: 8192]
///   -h, --help                 Print help
///   -V, --version              Print version
/// ```
///
/// `FILE` defaults to stdin; `-` also means stdin.
///
/// # Exit codes
///
/// | Code | Meaning                                      |
/// |------|----------------------------------------------|
/// | 0    | Success                                      |
/// | 1    | Error (I/O failure, malformed stream, etc.)  |
///
/// Errors and logs go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use jstream_decoder::DecodeOptions;
use jstream_decoder::options::DEFAULT_BUFFER_CAPACITY;

mod cmd_count;
mod cmd_inspect;
mod cmd_split;
mod cmd_validate;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Decode JSON record streams of any top-level shape.
#[derive(Parser)]
#[command(name = "jstream", version, about = "JSON record stream tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder activity to stderr (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reject any single record larger than this many bytes.
    #[arg(long, global = true, value_name = "N")]
    max_record_bytes: Option<usize>,

    /// Read buffer size for file input.
    #[arg(long, global = true, value_name = "N", default_value_t = DEFAULT_BUFFER_CAPACITY)]
    buffer_bytes: usize,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Write every record on its own line (NDJSON).
    Split(SplitArgs),
    /// Print the number of records in the stream.
    Count(InputArgs),
    /// Decode the whole stream and report success or the first error.
    Validate(InputArgs),
    /// Print index, kind, offset, and size for every record.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Input selection shared by every command.
#[derive(clap::Args)]
pub struct InputArgs {
    /// File to read; `-` or omitted reads stdin.
    pub file: Option<PathBuf>,
}

/// Arguments for `jstream split`.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                               │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ --compact    │ Drop whitespace outside strings so pretty-printed    │
/// │              │ records fit on one line                              │
/// │ -o / --output│ Write to a file instead of stdout                    │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct SplitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Strip insignificant whitespace from each record.
    #[arg(long)]
    pub compact: bool,

    /// Write records to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `jstream inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the whole record on an indented line instead of the preview.
    #[arg(long)]
    pub show_body: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    input::init_logging(cli.verbose);

    let mut options = DecodeOptions::default().with_buffer_capacity(cli.buffer_bytes);
    if let Some(limit) = cli.max_record_bytes {
        options = options.with_max_record_len(limit);
    }

    let result = match cli.command {
        Commands::Split(args) => cmd_split::run(&args, options),
        Commands::Count(args) => cmd_count::run(&args, options),
        Commands::Validate(args) => cmd_validate::run(&args, options),
        Commands::Inspect(args) => cmd_inspect::run(&args, options),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
