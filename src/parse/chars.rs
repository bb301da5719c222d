use std::io::{BufRead, Result};

/// Reads a single line, ending in either LF or CRLF. The line ending is not included.
/// Returns None if the reader is already at EOF. Invalid UTF-8 is replaced with U+FFFD.
pub fn read_line(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut raw = vec![];
    if reader.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }

    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}

/// Splits the line on the separator. Trailing empty parts are dropped, so "a: " gives ["a"].
pub fn split_tokens<'a>(line: &'a str, separator: &str) -> Vec<&'a str> {
    let mut tokens: Vec<&str> = line.split(separator).collect();
    while tokens.last().map(|t| t.is_empty()).unwrap_or(false) {
        tokens.pop();
    }
    tokens
}

/// Decodes up to `count` characters from the reader and passes each one to `f`.
/// Stops early, without an error, when the reader reaches EOF.
pub fn for_each_char<R, F>(reader: &mut R, count: u64, mut f: F) -> Result<()>
    where R: BufRead, F: FnMut(char) -> Result<()> {
    let mut read = 0;
    while read < count {
        match read_char(reader)? {
            Some(c) => f(c)?,
            None => break,
        }
        read += 1;
    }
    Ok(())
}

/// Decodes a single UTF-8 character. Malformed sequences decode to U+FFFD.
pub fn read_char(reader: &mut impl BufRead) -> Result<Option<char>> {
    let lead = match next_byte(reader)? {
        Some(b) => b,
        None => return Ok(None),
    };

    let width = match lead {
        0x00..=0x7F => return Ok(Some(lead as char)),
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
    };

    let mut encoded = [lead, 0, 0, 0];
    for i in 1..width {
        match peek_byte(reader)? {
            Some(b) if b & 0xC0 == 0x80 => {
                reader.consume(1);
                encoded[i] = b;
            }
            // leave the byte for the next character
            _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
        }
    }

    let c = std::str::from_utf8(&encoded[..width]).ok().and_then(|s| s.chars().next());
    Ok(Some(c.unwrap_or(char::REPLACEMENT_CHARACTER)))
}

fn peek_byte(reader: &mut impl BufRead) -> Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

fn next_byte(reader: &mut impl BufRead) -> Result<Option<u8>> {
    let b = peek_byte(reader)?;
    if b.is_some() {
        reader.consume(1);
    }
    Ok(b)
}
