/// Input opening and logging setup shared by every command.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::InputArgs;

/// An opened input plus the name to use for it in messages.
pub struct Input {
    pub reader: Box<dyn BufRead>,
    pub name: String,
}

/// Open the file named in `args`, or stdin when it is absent or `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open(args: &InputArgs, capacity: usize) -> Result<Input> {
    match args.file.as_deref() {
        None => Ok(stdin()),
        Some(path) if path == Path::new("-") => Ok(stdin()),
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            Ok(Input {
                reader: Box::new(BufReader::with_capacity(capacity, file)),
                name: path.display().to_string(),
            })
        }
    }
}

fn stdin() -> Input {
    Input {
        reader: Box::new(io::stdin().lock()),
        name: "<stdin>".to_string(),
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug`, and the
/// default is `warn`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
