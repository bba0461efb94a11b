//! Path composition.
//!
//! Paths are slash-delimited logical addresses (`"config/advanced/name"`), not
//! DOM locators. Everything here is pure string work; turning a path into
//! something a browser can query is the job of a
//! [`SelectorConvention`](crate::SelectorConvention).

use crate::result::{AreaError, AreaResult};
use crate::selector::Selector;

/// Path separator
pub const SEPARATOR: char = '/';

/// Join a parent path with a path relative to it.
///
/// The result is `parent + "/" + relative`, verbatim.
///
/// # Errors
///
/// Returns [`AreaError::InvalidPath`] if `relative` starts with `/`.
pub fn join(parent: &str, relative: &str) -> AreaResult<String> {
    if relative.starts_with(SEPARATOR) {
        return Err(AreaError::invalid_path(
            relative,
            "path is supposed to be relative to the page area",
        ));
    }
    Ok(format!("{parent}{SEPARATOR}{relative}"))
}

/// The path addressed by `rel` inside `path`.
///
/// An empty `rel` addresses `path` itself. A single leading `/` on `rel` is
/// dropped, so `""` and `"/"` both mean "self".
#[must_use]
pub fn compose(path: &str, rel: &str) -> String {
    let rel = rel.strip_prefix(SEPARATOR).unwrap_or(rel);
    if rel.is_empty() {
        return path.to_string();
    }
    format!("{path}{SEPARATOR}{rel}")
}

/// Selector for `rel` inside `path`. See [`compose`].
#[must_use]
pub fn to_selector(path: &str, rel: &str) -> Selector {
    Selector::Path(compose(path, rel))
}

/// Normalize a path: no leading `/`, no empty segments.
#[must_use]
pub fn normalize(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

/// Non-empty segments of a path, in order
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Whether the path names the root
#[must_use]
pub fn is_root(path: &str) -> bool {
    segments(path).next().is_none()
}
