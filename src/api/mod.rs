//! Purpose: Define the stable public Rust API boundary for culvert.
//! Exports: Stream helpers, cause-chain tools, and the error model.
//! Role: Public, additive-only surface; hides internal module layout.
//! Invariants: This module is the only public path callers should depend on.

pub use crate::core::cause::{chain, chain_text, find_cause, is_caused_by, root_cause, Chain};
pub use crate::core::close::{close_quietly, Close};
pub use crate::core::copy::{copy, DEFAULT_BUF_LEN};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::read::{read_lines, read_to_string, read_to_string_lossy};
pub use crate::core::temp::named_temp_file;
pub use crate::core::write::{write_line, write_str};
