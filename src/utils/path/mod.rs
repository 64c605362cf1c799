//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_path`, `relative_path`)

pub mod fs;

// Re-export commonly used functions from fs (used in many places)
pub use fs::{normalize_path, relative_path, resolve_path};

use std::path::Path;

/// Render a path as a forward-slash string.
///
/// Returns `None` for paths that are not valid UTF-8.
pub fn to_slash(path: &Path) -> Option<String> {
    path.to_str().map(|s| s.replace('\\', "/"))
}

/// Final file name of a path as UTF-8.
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
