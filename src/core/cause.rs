//! Purpose: Walk and inspect `std::error::Error` cause chains.
//! Exports: `Chain`, `chain`, `root_cause`, `is_caused_by`, `find_cause`, `chain_text`.
//! Role: Shared introspection for error reporting and recovery decisions.
//! Invariants: Traversal starts at the error itself, then its transitive sources.
//! Invariants: `chain_text` emits one `caused by:` line per source, in order.

use std::error::Error as StdError;
use std::fmt::Write as _;

/// Iterator over an error and its transitive sources.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Iterate `err` followed by each source in order.
pub fn chain<'a>(err: &'a (dyn StdError + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// The deepest error in the chain; `err` itself when it has no source.
pub fn root_cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current
}

/// True when `err` or any of its sources is a `T`.
///
/// Candidates are checked one type per call; chain calls with `||` to match
/// several.
pub fn is_caused_by<T: StdError + 'static>(err: &(dyn StdError + 'static)) -> bool {
    find_cause::<T>(err).is_some()
}

/// The first chain element that downcasts to `T`.
pub fn find_cause<'a, T: StdError + 'static>(err: &'a (dyn StdError + 'static)) -> Option<&'a T> {
    chain(err).find_map(|cause| cause.downcast_ref::<T>())
}

/// Render the whole chain as text, one cause per line.
pub fn chain_text(err: &(dyn StdError + 'static)) -> String {
    let mut text = String::new();
    for (depth, cause) in chain(err).enumerate() {
        if depth == 0 {
            let _ = writeln!(text, "{cause}");
        } else {
            let _ = writeln!(text, "  caused by: {cause}");
        }
    }
    text
}
