//! Compound key addressing.
//!
//! A key may name its index inline as `"<index>.<key>"`. An explicit, non-empty index
//! argument takes precedence and leaves the key untouched.

use crate::constants::{DEFAULT_INDEX, INDEX_SEPARATOR};

/// Split `key` into `(index_name, bare_key)`.
///
/// Only the first `.` separates the index; the rest stays in the bare key. A key with no
/// index part (`"name"`, `"name."`, `".name"`) addresses the default index.
pub(crate) fn normalize<'a>(key: &'a str, index: Option<&'a str>) -> (&'a str, &'a str) {
    if let Some(index) = index.filter(|i| !i.is_empty()) {
        return (index, key);
    }

    match key.split_once(INDEX_SEPARATOR) {
        Some((index, bare)) if !bare.is_empty() => {
            let index = if index.is_empty() { DEFAULT_INDEX } else { index };
            (index, bare)
        }
        _ => (DEFAULT_INDEX, key),
    }
}
