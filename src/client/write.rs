use std::io::{BufReader, Read, Result, Write};

use crate::common::HTTP_VERSION;
use crate::common::body::BodyPublisher;
use crate::common::header::CONTENT_LENGTH;
use crate::common::request::Request;

/// Size of the chunks a body is copied to the writer in.
const BODY_CHUNK_SIZE: usize = 4 * 1024;

/// Writes the given request to the given writer.
/// A streamed body is read fully into memory first, and its size replaces the Content-Length
/// the request was built with. The request's body source is dropped before this returns.
pub fn write_request(writer: &mut impl Write, request: Request) -> Result<()> {
    let (method, uri, headers, body) = request.into_parts();

    write!(writer, "{} {} {}\r\n", method, uri.path(), HTTP_VERSION)?;

    if body.requires_recompute() {
        let body = body.materialize()?;
        let mut headers = headers.thaw();
        headers.replace(CONTENT_LENGTH, body.content_length().to_string());
        debug!("Streamed body buffered to {} bytes", body.content_length());

        write_headers(writer, headers.iter())?;
        writer.flush()?;
        return write_body(writer, body);
    }

    write_headers(writer, headers.iter())?;
    writer.flush()?;

    if method.sends_body() {
        write_body(writer, body)?;
    }

    Ok(())
}

/// Writes each header on its own line, with multiple values joined by ';', followed by a blank line.
fn write_headers<'a>(writer: &mut impl Write, headers: impl Iterator<Item=(&'a str, &'a [String])>) -> Result<()> {
    for (name, values) in headers {
        write!(writer, "{}: {}\r\n", name, values.join(";"))?;
    }
    writer.write_all(b"\r\n")
}

/// Copies the body source to the writer in chunks, flushing after each one.
fn write_body(writer: &mut impl Write, body: BodyPublisher) -> Result<()> {
    let source = match body.into_source()? {
        Some(source) => source,
        None => return Ok(()),
    };

    let mut reader = BufReader::with_capacity(BODY_CHUNK_SIZE, source);
    let mut buf = [0u8; BODY_CHUNK_SIZE];
    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            return Ok(());
        }
        writer.write_all(&buf[..read])?;
        writer.flush()?;
    }
}
