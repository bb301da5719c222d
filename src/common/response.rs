use std::fs::File;
use std::io::{BufRead, BufWriter, Result, Write};
use std::path::PathBuf;

use crate::common::header::Headers;
use crate::parse::chars::for_each_char;

/// An HTTP response whose body was turned into a `T` by a `BodyHandler`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<T> {
    pub(crate) version: String,
    pub(crate) status_code: i32,
    pub(crate) headers: Headers,
    pub(crate) body: T,
}

impl<T> Response<T> {
    /// The version token from the status line, e.g. "HTTP/1.1".
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn status_code(&self) -> i32 {
        self.status_code
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn into_body(self) -> T {
        self.body
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::OfString {}

    impl Sealed for super::OfFile {}
}

/// Consumes a response body of a declared length into some result.
/// Implemented only by `OfString` and `OfFile`.
pub trait BodyHandler: sealed::Sealed {
    type Output;

    /// Reads `content_length` characters from the reader. Stops early without an error if the
    /// reader runs out of data.
    fn read_body(self, reader: &mut impl BufRead, content_length: u64) -> Result<Self::Output>;
}

/// Collects the body into a string.
#[derive(Debug, Copy, Clone, Default)]
pub struct OfString;

/// Writes the body to a file and yields the file's path.
#[derive(Debug, Clone)]
pub struct OfFile {
    path: PathBuf,
}

/// Handler that collects the body into a string.
pub fn of_string() -> OfString {
    OfString
}

/// Handler that writes the body to the file at the given path, creating or truncating it.
pub fn of_file(path: impl Into<PathBuf>) -> OfFile {
    OfFile { path: path.into() }
}

impl BodyHandler for OfString {
    type Output = String;

    fn read_body(self, reader: &mut impl BufRead, content_length: u64) -> Result<String> {
        let mut body = String::new();
        for_each_char(reader, content_length, |c| {
            body.push(c);
            Ok(())
        })?;
        Ok(body)
    }
}

impl BodyHandler for OfFile {
    type Output = PathBuf;

    fn read_body(self, reader: &mut impl BufRead, content_length: u64) -> Result<PathBuf> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        let mut encoded = [0u8; 4];
        for_each_char(reader, content_length, |c| {
            writer.write_all(c.encode_utf8(&mut encoded).as_bytes())
        })?;
        writer.flush()?;
        Ok(self.path)
    }
}
