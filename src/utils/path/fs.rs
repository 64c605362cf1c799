//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_path` - resolve config paths against the project root
//! - `relative_path` - lexical `relpath` that may climb with `..`

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a configured path against the project root.
///
/// Expands a leading `~` first. Absolute paths are kept, relative ones are
/// joined onto `root`. The result is normalized.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        normalize_path(&expanded)
    } else {
        normalize_path(&root.join(expanded))
    }
}

/// Lexically clean a path: drop `.` components and fold `..` into the
/// preceding component where possible. The filesystem is not consulted.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is still `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    out.into_iter().map(Component::as_os_str).collect()
}

/// Compute `path` relative to `base`, purely lexically.
///
/// Shared leading components are dropped and each remaining component of
/// `base` becomes a `..`. Equal paths yield `.`.
///
/// # Example
/// ```ignore
/// relative_path("/pub/MEDIAWEB/TOURS/a.jpg", "/pub/MEDIAWEB/TOURS") -> "a.jpg"
/// relative_path("/pub/MEDIAWEB/PDFS/a.pdf", "/pub/MEDIAWEB/TOURS")  -> "../PDFS/a.pdf"
/// ```
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let path = clean_path(path);
    let base = clean_path(base);

    let mut path_iter = path.components().peekable();
    let mut base_iter = base.components().peekable();

    while let (Some(a), Some(b)) = (path_iter.peek(), base_iter.peek()) {
        if a != b {
            break;
        }
        path_iter.next();
        base_iter.next();
    }

    let mut rel = PathBuf::new();
    for _ in base_iter {
        rel.push("..");
    }
    for component in path_iter {
        rel.push(component.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}
