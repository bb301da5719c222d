use std::fmt::{Display, Formatter};
use std::io::Error;

/// Error for when an HTTP response can't be parsed.
#[derive(Debug)]
pub enum ParsingError {
    /// The status line has more than three space separated parts.
    MalformedFirstLine(String),
    /// The status line doesn't start with a supported HTTP version.
    UnsupportedProtocol(String),
    /// The status code is not a 32-bit integer.
    InvalidStatusCode(String),
    /// A header line doesn't have exactly one ": " separator.
    MalformedHeader(String),
    /// The response has no Content-Length header, so the body can't be framed.
    MissingContentLength,
    /// The Content-Length header value is not a number.
    InvalidContentLength(String),
    /// EOF found before a status line could be read.
    UnexpectedEof,
    /// Error reading from the reader.
    Reading(Error),
}

impl From<Error> for ParsingError {
    fn from(err: Error) -> Self {
        ParsingError::Reading(err)
    }
}

impl Display for ParsingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParsingError::MalformedFirstLine(line) => write!(f, "invalid first line format: {:?}", line),
            ParsingError::UnsupportedProtocol(version) => write!(f, "unsupported protocol: {:?}", version),
            ParsingError::InvalidStatusCode(code) => write!(f, "invalid status code: {:?}", code),
            ParsingError::MalformedHeader(line) => write!(f, "invalid header format: {:?}", line),
            ParsingError::MissingContentLength => write!(f, "response has no Content-Length header"),
            ParsingError::InvalidContentLength(value) => write!(f, "invalid Content-Length value: {:?}", value),
            ParsingError::UnexpectedEof => write!(f, "connection closed before a response was read"),
            ParsingError::Reading(err) => write!(f, "error reading response: {}", err),
        }
    }
}

impl std::error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParsingError::Reading(err) => Some(err),
            _ => None,
        }
    }
}
