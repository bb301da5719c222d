use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::{Cursor, Read, Result};
use std::path::Path;

use crate::common::error::BuildError;

/// A readable byte source for a request body.
pub type Source = Box<dyn Read + Send>;

/// Produces the source of a streamed body. Called once, when the request is transmitted.
pub type Supplier = Box<dyn FnOnce() -> Source + Send>;

/// Where a request body comes from and how many bytes it declares.
#[derive(Default)]
pub enum BodyPublisher {
    /// No body. Declares a length of 0.
    #[default]
    NoBody,
    /// A body whose length is known up front.
    Fixed {
        source: Source,
        content_length: u64,
    },
    /// A body whose length is only known after its source has been read fully.
    Stream(StreamBody),
}

/// Two states of a streamed body. The only transition is `Unmaterialized` to `Materialized`,
/// made by `BodyPublisher::materialize` before any header is written.
pub enum StreamBody {
    Unmaterialized(Supplier),
    Materialized(Vec<u8>),
}

impl BodyPublisher {
    pub fn no_body() -> BodyPublisher {
        BodyPublisher::NoBody
    }

    /// Publishes the bytes of the given string.
    pub fn of_string(s: impl Into<String>) -> BodyPublisher {
        BodyPublisher::of_byte_array(s.into().into_bytes())
    }

    /// Publishes the given bytes.
    pub fn of_byte_array(buf: impl Into<Vec<u8>>) -> BodyPublisher {
        let buf = buf.into();
        let content_length = buf.len() as u64;
        BodyPublisher::Fixed { source: Box::new(Cursor::new(buf)), content_length }
    }

    /// Publishes `length` bytes of `buf` starting at `offset`.
    /// Fails if the range does not lie inside the buffer.
    pub fn of_byte_array_range(buf: &[u8], offset: usize, length: usize) -> std::result::Result<BodyPublisher, BuildError> {
        // Stricter than `length - offset > len`: a range that overruns the buffer is rejected too,
        // so the declared length always matches the bytes sent.
        match offset.checked_add(length) {
            Some(end) if end <= buf.len() => Ok(BodyPublisher::of_byte_array(&buf[offset..end])),
            _ => Err(BuildError::OutOfRange { offset, length, len: buf.len() }),
        }
    }

    /// Publishes the contents of a file. The length comes from the file's metadata.
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<BodyPublisher, BuildError> {
        let file = File::open(path)?;
        let content_length = file.metadata()?.len();
        Ok(BodyPublisher::Fixed { source: Box::new(file), content_length })
    }

    /// Publishes whatever the supplied source yields. The source is not created until the
    /// request is transmitted, so the declared length stays 0 until then.
    pub fn of_input_stream<F, R>(supplier: F) -> BodyPublisher
        where F: FnOnce() -> R + Send + 'static, R: Read + Send + 'static {
        BodyPublisher::Stream(StreamBody::Unmaterialized(Box::new(move || Box::new(supplier()) as Source)))
    }

    /// The length used for the Content-Length header.
    pub fn content_length(&self) -> u64 {
        match self {
            BodyPublisher::NoBody => 0,
            BodyPublisher::Fixed { content_length, .. } => *content_length,
            BodyPublisher::Stream(StreamBody::Unmaterialized(_)) => 0,
            BodyPublisher::Stream(StreamBody::Materialized(buf)) => buf.len() as u64,
        }
    }

    /// Whether the Content-Length must be computed again at transmission.
    pub fn requires_recompute(&self) -> bool {
        matches!(self, BodyPublisher::Stream(_))
    }

    /// Reads a streamed body fully into memory. Other publishers are returned unchanged.
    pub fn materialize(self) -> Result<BodyPublisher> {
        match self {
            BodyPublisher::Stream(StreamBody::Unmaterialized(supplier)) => {
                let mut buf = vec![];
                supplier().read_to_end(&mut buf)?;
                Ok(BodyPublisher::Stream(StreamBody::Materialized(buf)))
            }
            other => Ok(other),
        }
    }

    /// Turns the publisher into its byte source, or None if there is no body.
    pub fn into_source(self) -> Result<Option<Source>> {
        Ok(match self.materialize()? {
            BodyPublisher::NoBody => None,
            BodyPublisher::Fixed { source, .. } => Some(source),
            BodyPublisher::Stream(StreamBody::Materialized(buf)) => Some(Box::new(Cursor::new(buf))),
            BodyPublisher::Stream(StreamBody::Unmaterialized(_)) => None,
        })
    }
}

impl Debug for BodyPublisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyPublisher::NoBody => write!(f, "NoBody"),
            BodyPublisher::Fixed { content_length, .. } => write!(f, "Fixed({} bytes)", content_length),
            BodyPublisher::Stream(StreamBody::Unmaterialized(_)) => write!(f, "Stream(unmaterialized)"),
            BodyPublisher::Stream(StreamBody::Materialized(buf)) => write!(f, "Stream({} bytes)", buf.len()),
        }
    }
}
