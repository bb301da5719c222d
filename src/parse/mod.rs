pub use response::*;

/// Parsing errors.
pub mod error;
/// Line and character reading on top of a buffered reader.
pub(crate) mod chars;
/// Response parsing.
mod response;
