//! Media tree enumeration.

use jwalk::{Parallelism, WalkDir};
use std::path::{Path, PathBuf};

use super::ManifestError;
use crate::config::ScanConfig;
use crate::debug;

/// Walk `root` and yield every regular file, depth-first.
///
/// Entries of each directory are visited in file-name order, so repeated runs
/// over the same tree yield the same sequence. Hidden files are included.
/// Symlinked directories are not entered; a symlink to a regular file is
/// yielded like the file itself. Names on the ignore list are skipped.
///
/// Any walk error is yielded as `Err` and ends the caller's run. This
/// includes a directory whose children could not be read, which jwalk
/// reports on the directory entry instead of as a separate item.
pub fn walk_files<'a>(
    root: &Path,
    scan: &'a ScanConfig,
) -> impl Iterator<Item = Result<PathBuf, ManifestError>> + 'a {
    let walk_root = root.to_path_buf();

    WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .sort(true)
        .skip_hidden(false)
        .follow_links(false)
        .into_iter()
        .filter_map(move |entry| {
            let mut entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    return Some(Err(ManifestError::Walk {
                        root: walk_root.clone(),
                        source: e,
                    }));
                }
            };

            if let Some(e) = entry.read_children_error.take() {
                return Some(Err(ManifestError::Walk {
                    root: walk_root.clone(),
                    source: e,
                }));
            }

            let file_type = entry.file_type();
            let path = entry.path();
            let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
            if !is_file {
                return None;
            }

            if entry
                .file_name()
                .to_str()
                .is_some_and(|name| scan.is_ignored(name))
            {
                debug!("scan"; "ignored {}", path.display());
                return None;
            }

            Some(Ok(path))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn collect(root: &Path, scan: &ScanConfig) -> Vec<String> {
        walk_files(root, scan)
            .map(|r| r.unwrap())
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_walk_yields_files_only_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b/2.jpg");
        touch(dir.path(), "a/z.png");
        touch(dir.path(), "a/y/1.png");
        touch(dir.path(), "c.txt");
        fs::create_dir_all(dir.path().join("empty")).unwrap();

        let files = collect(dir.path(), &ScanConfig::default());
        assert_eq!(files, vec!["a/y/1.png", "a/z.png", "b/2.jpg", "c.txt"]);
    }

    #[test]
    fn test_walk_includes_hidden_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".hidden/a.png");
        touch(dir.path(), ".DS_Store");

        let files = collect(dir.path(), &ScanConfig::default());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_walk_skips_ignored_names() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "TOURS/.DS_Store");
        touch(dir.path(), "TOURS/a.jpg");

        let scan = ScanConfig {
            ignore: vec![".DS_Store".into()],
        };
        assert_eq!(collect(dir.path(), &scan), vec!["TOURS/a.jpg"]);
    }

    #[test]
    fn test_walk_removed_root_yields_walk_error() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("MEDIAWEB");
        touch(&root, "TOURS/a.jpg");
        fs::remove_dir_all(&root).unwrap();

        let results: Vec<_> = walk_files(&root, &ScanConfig::default()).collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(
            &results[0],
            Err(ManifestError::Walk { root: r, .. }) if r == &root
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_unreadable_dir_yields_walk_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        touch(dir.path(), "TOURS/a.jpg");
        let locked = dir.path().join("TOURS");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // privileged users read the directory anyway
        let readable = fs::read_dir(&locked).is_ok();
        let results: Vec<_> = walk_files(dir.path(), &ScanConfig::default()).collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        assert!(
            results
                .iter()
                .any(|r| matches!(r, Err(ManifestError::Walk { .. })))
        );
    }

    #[test]
    fn test_walk_empty_root() {
        let dir = TempDir::new().unwrap();
        assert!(collect(dir.path(), &ScanConfig::default()).is_empty());
    }
}
