//! Purpose: Write string content to byte sinks.
//! Exports: `write_str`, `write_line`.
//! Role: Encode side of the read/decode helpers; strings go out as UTF-8.
//! Invariants: The full string is written or an error is returned.

use std::io::Write;

use crate::core::error::{Error, ErrorKind};

/// Write `data` to `writer` as UTF-8 bytes.
pub fn write_str<W>(data: &str, writer: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    writer.write_all(data.as_bytes()).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("write failed")
            .with_source(err)
    })
}

/// Write `data` followed by a newline.
pub fn write_line<W>(data: &str, writer: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    write_str(data, writer)?;
    write_str("\n", writer)
}

#[cfg(test)]
mod tests {
    use super::{write_line, write_str};

    #[test]
    fn writes_utf8_bytes() {
        let mut out = Vec::new();
        write_str("grüße", &mut out).expect("write");
        assert_eq!(out, "grüße".as_bytes());
    }

    #[test]
    fn empty_string_writes_nothing() {
        let mut out = Vec::new();
        write_str("", &mut out).expect("write");
        assert!(out.is_empty());
    }

    #[test]
    fn line_appends_newline() {
        let mut out = Vec::new();
        write_line("done", &mut out).expect("write");
        assert_eq!(out, b"done\n");
    }
}
