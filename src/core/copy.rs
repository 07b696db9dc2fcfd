//! Purpose: Buffered byte copy between readers and writers.
//! Exports: `copy`, `DEFAULT_BUF_LEN`.
//! Role: The one copy loop shared by library callers and the CLI.
//! Invariants: Byte content is preserved exactly; the returned count is exact.
//! Invariants: A writer that accepts zero bytes surfaces as an error, never a spin.

use std::io::{ErrorKind as IoErrorKind, Read, Write};

use crate::core::error::{Error, ErrorKind};

/// Fixed copy buffer length.
pub const DEFAULT_BUF_LEN: usize = 4 * 1024;

/// Copy everything from `reader` to `writer`, returning the byte count.
///
/// Reads are retried on interruption; each chunk is written in full before
/// the next read (`write_all` turns a stalled writer into `WriteZero`).
pub fn copy<R, W>(reader: &mut R, writer: &mut W) -> Result<u64, Error>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = [0u8; DEFAULT_BUF_LEN];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(err) if err.kind() == IoErrorKind::Interrupted => continue,
            Err(err) => {
                return Err(Error::new(ErrorKind::Io)
                    .with_message("read failed during copy")
                    .with_source(err));
            }
        };
        writer.write_all(&buf[..n]).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("write failed during copy")
                .with_source(err)
        })?;
        total += n as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::{copy, DEFAULT_BUF_LEN};
    use std::io::{self, Read};

    #[test]
    fn copy_small_data() {
        let mut reader: &[u8] = b"hello world";
        let mut writer = Vec::new();
        let n = copy(&mut reader, &mut writer).expect("copy");
        assert_eq!(n, 11);
        assert_eq!(writer, b"hello world");
    }

    #[test]
    fn copy_empty_data() {
        let mut reader: &[u8] = b"";
        let mut writer = Vec::new();
        let n = copy(&mut reader, &mut writer).expect("copy");
        assert_eq!(n, 0);
        assert!(writer.is_empty());
    }

    #[test]
    fn copy_spans_multiple_buffers() {
        let data: Vec<u8> = (0..(DEFAULT_BUF_LEN * 3 + 17))
            .map(|i| (i % 251) as u8)
            .collect();
        let mut reader: &[u8] = &data;
        let mut writer = Vec::new();
        let n = copy(&mut reader, &mut writer).expect("copy");
        assert_eq!(n, data.len() as u64);
        assert_eq!(writer, data);
    }

    struct InterruptedOnce {
        inner: &'static [u8],
        interrupted: bool,
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn copy_retries_interrupted_reads() {
        let mut reader = InterruptedOnce {
            inner: b"survives",
            interrupted: false,
        };
        let mut writer = Vec::new();
        let n = copy(&mut reader, &mut writer).expect("copy");
        assert_eq!(n, 8);
        assert_eq!(writer, b"survives");
    }
}
