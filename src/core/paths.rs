//! Helpers for comparing paths and lists against command output.

use std::path::{Path, MAIN_SEPARATOR};

/// Rewrite `path` with `/` separators and every space escaped as `\ `.
///
/// The result matches how shells and tools print paths, independent of the
/// host separator convention.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    let raw = path.as_ref().to_string_lossy();
    let slashed = if MAIN_SEPARATOR == '/' {
        raw.into_owned()
    } else {
        raw.replace(MAIN_SEPARATOR, "/")
    };
    slashed.replace(' ', "\\ ")
}

/// Position of the first element equal to `target`, `None` when absent.
pub fn index_of<T, Q>(items: &[T], target: &Q) -> Option<usize>
where
    T: PartialEq<Q>,
    Q: ?Sized,
{
    items.iter().position(|item| item == target)
}
