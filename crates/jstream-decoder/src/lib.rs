#![warn(clippy::pedantic)]

pub mod decode;
pub mod error;
pub mod options;
pub mod record;
pub mod stream;

pub use decode::{decode, decode_reader, decode_reader_with_options, decode_with_options};
pub use error::{DecodeError, ErrorCategory, HandlerError};
pub use options::DecodeOptions;
pub use record::{RawRecord, RecordKind};
pub use stream::{Cursor, RecordStream};
