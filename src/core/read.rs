//! Purpose: Read a byte stream fully into a `String` or a list of lines.
//! Exports: `read_to_string`, `read_to_string_lossy`, `read_lines`.
//! Role: Drain-and-decode convenience over arbitrary readers.
//! Invariants: `read_lines` yields an unterminated final line and tolerates CRLF.
//! Invariants: Strict decoding keeps the UTF-8 failure as the error cause.

use std::io::{BufRead, BufReader, Read};

use crate::core::error::{Error, ErrorKind};

/// Read everything from `reader` and decode it as UTF-8.
///
/// Invalid UTF-8 is a `Decode` error; use [`read_to_string_lossy`] when
/// replacement characters are acceptable.
pub fn read_to_string<R: Read>(reader: R) -> Result<String, Error> {
    let bytes = read_to_end(reader)?;
    String::from_utf8(bytes).map_err(|err| {
        Error::new(ErrorKind::Decode)
            .with_message("stream is not valid UTF-8")
            .with_source(err)
    })
}

/// Read everything from `reader`, replacing invalid UTF-8 sequences.
pub fn read_to_string_lossy<R: Read>(reader: R) -> Result<String, Error> {
    let bytes = read_to_end(reader)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read `reader` line by line into a vector.
///
/// Lines are split on `\n`; a preceding `\r` is stripped. A final line
/// without a terminator is still yielded. Buffering is internal, so callers
/// can hand over a bare `File` or socket.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<String>, Error> {
    let mut buffered = BufReader::new(reader);
    let mut lines = Vec::new();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        let n = buffered.read_until(b'\n', &mut raw).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("read failed while splitting lines")
                .with_source(err)
        })?;
        if n == 0 {
            return Ok(lines);
        }
        if raw.last() == Some(&b'\n') {
            raw.pop();
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
        }
        let line = String::from_utf8(std::mem::take(&mut raw)).map_err(|err| {
            Error::new(ErrorKind::Decode)
                .with_message("line is not valid UTF-8")
                .with_source(err)
        })?;
        lines.push(line);
    }
}

fn read_to_end<R: Read>(mut reader: R) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("read failed while draining stream")
            .with_source(err)
    })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::{read_lines, read_to_string, read_to_string_lossy};
    use crate::core::error::ErrorKind;

    #[test]
    fn reads_full_stream_to_string() {
        let data: &[u8] = "streams all the way down".as_bytes();
        let text = read_to_string(data).expect("read");
        assert_eq!(text, "streams all the way down");
    }

    #[test]
    fn strict_decode_rejects_invalid_utf8() {
        let data: &[u8] = &[0x66, 0x6f, 0xff, 0x6f];
        let err = read_to_string(data).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn lossy_decode_substitutes_replacement_char() {
        let data: &[u8] = &[0x66, 0x6f, 0xff, 0x6f];
        let text = read_to_string_lossy(data).expect("read");
        assert_eq!(text, "fo\u{fffd}o");
    }

    #[test]
    fn lines_basic() {
        let data: &[u8] = b"line 1\nline 2\nline 3\n";
        let lines = read_lines(data).expect("lines");
        assert_eq!(lines, vec!["line 1", "line 2", "line 3"]);
    }

    #[test]
    fn lines_crlf_matches_lf() {
        let crlf = read_lines(&b"a\r\nb\r\n"[..]).expect("lines");
        let lf = read_lines(&b"a\nb\n"[..]).expect("lines");
        assert_eq!(crlf, lf);
    }

    #[test]
    fn lines_incomplete_last() {
        let lines = read_lines(&b"foo\nbar"[..]).expect("lines");
        assert_eq!(lines, vec!["foo", "bar"]);
    }

    #[test]
    fn lines_empty_input() {
        let lines = read_lines(&b""[..]).expect("lines");
        assert!(lines.is_empty());
    }

    #[test]
    fn lines_preserve_blank_lines() {
        let lines = read_lines(&b"a\n\nb\n"[..]).expect("lines");
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn lines_keep_interior_carriage_returns() {
        let lines = read_lines(&b"a\rb\n"[..]).expect("lines");
        assert_eq!(lines, vec!["a\rb"]);
    }
}
