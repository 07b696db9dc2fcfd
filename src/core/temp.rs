//! Purpose: Scratch-file creation for callers that need a real path.
//! Exports: `named_temp_file`.
//! Role: Thin wrapper fixing prefix/suffix naming over the `tempfile` crate.
//! Invariants: Files land in the system temp dir and are removed on drop.

use tempfile::NamedTempFile;

use crate::core::error::{Error, ErrorKind};

/// Create a uniquely named temp file as `{prefix}{random}{suffix}`.
pub fn named_temp_file(prefix: &str, suffix: &str) -> Result<NamedTempFile, Error> {
    tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile()
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to create temp file")
                .with_source(err)
        })
}
