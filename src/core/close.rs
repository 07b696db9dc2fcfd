//! Purpose: Quiet teardown of resources whose close can fail.
//! Exports: `Close`, `close_quietly`.
//! Role: Keep cleanup paths from clobbering the error that got them there.
//! Invariants: `close_quietly` never panics and never propagates.
//! Invariants: Every suppressed failure is logged exactly once at `warn`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::{Shutdown, TcpStream};

use tracing::warn;

const CLOSE_WARNING: &str = "close failed; error suppressed";

/// A resource with a fallible, consuming teardown.
///
/// Dropping these types silently discards close failures; routing them
/// through `close` keeps the failure observable.
pub trait Close {
    fn close(self) -> io::Result<()>;
}

impl Close for File {
    fn close(self) -> io::Result<()> {
        self.sync_all()
    }
}

impl Close for TcpStream {
    fn close(self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

impl<W: Write> Close for BufWriter<W> {
    fn close(self) -> io::Result<()> {
        match self.into_inner() {
            Ok(_inner) => Ok(()),
            Err(err) => Err(err.into_error()),
        }
    }
}

/// Absent resources close trivially.
impl<C: Close> Close for Option<C> {
    fn close(self) -> io::Result<()> {
        match self {
            Some(resource) => resource.close(),
            None => Ok(()),
        }
    }
}

/// Close `resource`, suppressing and logging any failure.
///
/// For cleanup paths that are already unwinding from a primary error.
pub fn close_quietly<C: Close>(resource: C) {
    if let Err(err) = resource.close() {
        warn!(error = %err, "{}", CLOSE_WARNING);
    }
}

#[cfg(test)]
mod tests {
    use super::{close_quietly, Close};
    use std::fs;
    use std::io::{self, BufWriter, Write};

    struct AlwaysFails;

    impl Close for AlwaysFails {
        fn close(self) -> io::Result<()> {
            Err(io::Error::other("teardown refused"))
        }
    }

    #[test]
    fn suppresses_close_failures() {
        close_quietly(AlwaysFails);
    }

    #[test]
    fn none_closes_trivially() {
        let resource: Option<AlwaysFails> = None;
        assert!(resource.close().is_ok());
    }

    #[test]
    fn some_delegates_to_inner() {
        let resource = Some(AlwaysFails);
        assert!(resource.close().is_err());
    }

    #[test]
    fn buf_writer_close_flushes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let file = fs::File::create(&path).expect("create");
        let mut writer = BufWriter::new(file);
        writer.write_all(b"buffered bytes").expect("write");
        writer.close().expect("close");

        let content = fs::read(&path).expect("read back");
        assert_eq!(content, b"buffered bytes");
    }

    #[test]
    fn file_close_succeeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.bin");
        fs::write(&path, b"x").expect("seed");
        let file = fs::File::open(&path).expect("open");
        close_quietly(file);
    }
}
