use std::io::BufRead;

use crate::common::{HTTP_2_VERSION, HTTP_VERSION};
use crate::common::header::{CONTENT_LENGTH, HeaderTable};
use crate::common::response::{BodyHandler, Response};
use crate::parse::chars::{read_line, split_tokens};
use crate::parse::error::ParsingError;

/// Reads a response from the reader, using the handler to consume the body.
/// Fails on the first malformed part; no partial response is ever produced.
pub fn read_response<H: BodyHandler>(reader: &mut impl BufRead, handler: H) -> Result<Response<H::Output>, ParsingError> {
    let first_line = read_line(reader)?.ok_or(ParsingError::UnexpectedEof)?;
    let (version, status_code) = parse_first_line(&first_line)?;

    let headers = read_headers(reader)?;

    let content_length = get_content_length(&headers)?;
    let body = handler.read_body(reader, content_length)?;

    Ok(Response { version, status_code, headers: headers.freeze(), body })
}

/// Parses the status line. Returns the http version and the status code only.
fn parse_first_line(line: &str) -> Result<(String, i32), ParsingError> {
    let parts = split_tokens(line, " ");
    if parts.len() > 3 {
        return Err(ParsingError::MalformedFirstLine(line.to_string()));
    }

    let version = parts.first().copied().unwrap_or_default();
    if version != HTTP_VERSION && version != HTTP_2_VERSION {
        return Err(ParsingError::UnsupportedProtocol(version.to_string()));
    }

    let code = parts.get(1).copied().unwrap_or_default();
    let status_code = code.parse().map_err(|_| ParsingError::InvalidStatusCode(code.to_string()))?;

    Ok((version.to_string(), status_code))
}

/// Reads header lines until a blank line or EOF. Repeated names accumulate values.
fn read_headers(reader: &mut impl BufRead) -> Result<HeaderTable, ParsingError> {
    let mut headers = HeaderTable::new();

    while let Some(line) = read_line(reader)? {
        if line.trim().is_empty() {
            break;
        }

        match split_tokens(&line, ": ").as_slice() {
            [name, value] => headers.add(*name, *value),
            _ => return Err(ParsingError::MalformedHeader(line.clone())),
        }
    }

    Ok(headers)
}

fn get_content_length(headers: &HeaderTable) -> Result<u64, ParsingError> {
    let value = headers.first(CONTENT_LENGTH).ok_or(ParsingError::MissingContentLength)?;
    value.trim().parse().map_err(|_| ParsingError::InvalidContentLength(value.to_string()))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::BufReader;

    use crate::common::header::{CONTENT_LENGTH, CONTENT_TYPE};
    use crate::common::response::{of_file, of_string, Response};
    use crate::parse::error::ParsingError;
    use crate::parse::response::read_response;
    use crate::util::mock::{MockReader, temp_path};

    fn test_read_response(data: Vec<&str>) -> Result<Response<String>, ParsingError> {
        let mut reader = BufReader::new(MockReader::new(data));
        read_response(&mut reader, of_string())
    }

    #[test]
    fn headers_and_body() {
        let response = test_read_response(
            vec!["HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf8\r\nContent-Length: 9\r\n\r\nsome body"],
        ).unwrap();

        assert_eq!(response.version(), "HTTP/1.1");
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.headers().first(CONTENT_TYPE), Some("text/html; charset=utf8"));
        assert_eq!(response.headers().first(CONTENT_LENGTH), Some("9"));
        assert_eq!(response.body(), "some body");
    }

    #[test]
    fn headers_and_body_fragmented() {
        let response = test_read_response(
            vec!["HTT", "P/1.", "1 200 OK", "\r", "\nConte", "nt-Length", ":", " 5\r\n\r\nh", "el", "lo"],
        ).unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), "hello");
    }

    #[test]
    fn lf_line_endings() {
        let response = test_read_response(vec!["HTTP/1.1 200 OK\nContent-Length: 9\n\nsome body\n"]).unwrap();
        assert_eq!(response.body(), "some body");
    }

    #[test]
    fn no_status_reason() {
        let response = test_read_response(vec!["HTTP/1.1 204\r\nContent-Length: 0\r\n\r\n"]).unwrap();
        assert_eq!(response.status_code(), 204);
        assert_eq!(response.body(), "");
    }

    #[test]
    fn http_2_version_token() {
        let response = test_read_response(vec!["HTTP/2.0 404 NotFound\r\nContent-Length: 4\r\n\r\nnope"]).unwrap();
        assert_eq!(response.version(), "HTTP/2.0");
        assert_eq!(response.status_code(), 404);
    }

    #[test]
    fn repeated_headers_accumulate() {
        let response = test_read_response(
            vec!["HTTP/1.1 200 OK\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\nContent-Length: 0\r\n\r\n"],
        ).unwrap();
        assert_eq!(response.headers().get("Set-Cookie").unwrap(), &["a=1", "b=2"]);
    }

    #[test]
    fn only_content_length_characters_read() {
        let response = test_read_response(
            vec!["HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nhello", "HTTP/1.1 200 OK\r\n\r\n"],
        ).unwrap();
        assert_eq!(response.body(), "hel");
    }

    #[test]
    fn content_length_too_long() {
        let response = test_read_response(vec!["HTTP/1.1 200 OK\r\nContent-Length: 7\r\n\r\nhello"]).unwrap();
        assert_eq!(response.body(), "hello");
    }

    #[test]
    fn body_to_file() {
        let path = temp_path("body_to_file");
        let mut reader = BufReader::new(MockReader::new(vec!["HTTP/1.1 200 OK\r\nContent-Length: 9\r\n\r\nsome body"]));

        let response = read_response(&mut reader, of_file(&path)).unwrap();

        assert_eq!(response.body(), &path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "some body");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn too_many_first_line_parts() {
        let result = test_read_response(vec!["HTTP/1.1 200 OK adakjsd\r\nContent-Length: 0\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::MalformedFirstLine(line)) if line == "HTTP/1.1 200 OK adakjsd"));
    }

    #[test]
    fn unsupported_protocol() {
        let result = test_read_response(vec!["HTTP 200OK\r\nContent-Length: 0\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::UnsupportedProtocol(version)) if version == "HTTP"));
    }

    #[test]
    fn gibberish() {
        let result = test_read_response(vec!["ergejrogi jerogij eworfgjwoefjwof9wef wfw\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::MalformedFirstLine(_))));

        let result = test_read_response(vec!["ergejrogi jerogij\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::UnsupportedProtocol(version)) if version == "ergejrogi"));
    }

    #[test]
    fn blank_first_line() {
        let result = test_read_response(vec!["\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::UnsupportedProtocol(version)) if version.is_empty()));
    }

    #[test]
    fn non_numeric_status_code() {
        let result = test_read_response(vec!["HTTP/1.1 OK\r\nContent-Length: 0\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::InvalidStatusCode(code)) if code == "OK"));
    }

    #[test]
    fn status_code_is_any_integer() {
        let response = test_read_response(vec!["HTTP/1.1 70000 X\r\nContent-Length: 0\r\n\r\n"]).unwrap();
        assert_eq!(response.status_code(), 70000);

        let result = test_read_response(vec!["HTTP/1.1 99999999999 X\r\nContent-Length: 0\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::InvalidStatusCode(code)) if code == "99999999999"));
    }

    #[test]
    fn missing_status_code() {
        let result = test_read_response(vec!["HTTP/1.1\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::InvalidStatusCode(_))));
    }

    #[test]
    fn malformed_header() {
        let result = test_read_response(vec!["HTTP/1.1 200 OK\r\nContent-Type text/html\r\nContent-Length: 0\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::MalformedHeader(line)) if line == "Content-Type text/html"));
    }

    #[test]
    fn header_with_two_separators() {
        let result = test_read_response(vec!["HTTP/1.1 200 OK\r\nX-A: b: c\r\nContent-Length: 0\r\n\r\n"]);
        assert!(matches!(result, Err(ParsingError::MalformedHeader(_))));
    }

    #[test]
    fn missing_content_length() {
        let result = test_read_response(vec!["HTTP/1.1 200 OK\r\n\r\nhello"]);
        assert!(matches!(result, Err(ParsingError::MissingContentLength)));
    }

    #[test]
    fn lowercase_content_length_is_a_different_header() {
        let result = test_read_response(vec!["HTTP/1.1 200 OK\r\ncontent-length: 5\r\n\r\nhello"]);
        assert!(matches!(result, Err(ParsingError::MissingContentLength)));
    }

    #[test]
    fn bad_content_length_value() {
        let result = test_read_response(vec!["HTTP/1.1 200 OK\r\nContent-Length: five\r\n\r\nhello"]);
        assert!(matches!(result, Err(ParsingError::InvalidContentLength(value)) if value == "five"));
    }

    #[test]
    fn no_data() {
        let result = test_read_response(vec![]);
        assert!(matches!(result, Err(ParsingError::UnexpectedEof)));
    }
}
