#![warn(clippy::pedantic)]

pub mod error;
pub mod scan;
pub mod source;

pub use error::WireError;
pub use scan::scan_value;
pub use source::ByteSource;
