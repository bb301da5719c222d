use std::fmt::{Display, Formatter};
use std::io::Error;

/// Error when a request or one of its body publishers can't be built.
#[derive(Debug)]
pub enum BuildError {
    /// The request was built without ever setting a URI.
    UriNotSet,
    /// The URI doesn't start with "http://" or "https://".
    InvalidScheme(String),
    /// A flat list of header names and values had an odd number of entries.
    OddHeaderCount(usize),
    /// The header can only be set by the body publishing logic.
    RestrictedHeader(String),
    /// A byte range doesn't fit in its buffer.
    OutOfRange { offset: usize, length: usize, len: usize },
    /// Error opening a body source.
    Io(Error),
}

impl From<Error> for BuildError {
    fn from(err: Error) -> Self {
        BuildError::Io(err)
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::UriNotSet => write!(f, "URI has not been set"),
            BuildError::InvalidScheme(uri) => write!(f, "invalid URI scheme: {}", uri),
            BuildError::OddHeaderCount(count) => write!(f, "headers length is odd: {}", count),
            BuildError::RestrictedHeader(name) => write!(f, "restricted header name: {}", name),
            BuildError::OutOfRange { offset, length, len } => {
                write!(f, "range {}+{} out of bounds for length {}", offset, length, len)
            }
            BuildError::Io(err) => write!(f, "failed to open body source: {}", err),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Io(err) => Some(err),
            _ => None,
        }
    }
}
