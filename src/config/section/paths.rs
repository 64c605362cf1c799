//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! public = "public"                         # root that `localPath` is relative to
//! scan = "public/MEDIAWEB"                  # directory tree to scan
//! output = "build/all-media-manifest.json"  # manifest location
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::path::resolve_path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Project public-assets root. `localPath` values are relative to it.
    pub public: PathBuf,

    /// Directory scanned for media files. Bucket roots live below it.
    pub scan: PathBuf,

    /// Manifest output file.
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            public: "public".into(),
            scan: "public/MEDIAWEB".into(),
            output: "build/all-media-manifest.json".into(),
        }
    }
}

impl PathsConfig {
    pub const FIELD_SCAN: FieldPath = FieldPath::new("paths.scan");
    pub const FIELD_OUTPUT: FieldPath = FieldPath::new("paths.output");

    /// Resolve all paths against the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.public = resolve_path(&self.public, root);
        self.scan = resolve_path(&self.scan, root);
        self.output = resolve_path(&self.output, root);
    }

    /// Validate normalized paths.
    ///
    /// # Checks
    /// - `output` must name a file, not an existing directory.
    /// - `scan` outside `public` only warns: `localPath` then climbs with `..`.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.is_dir() {
            diag.error(
                Self::FIELD_OUTPUT,
                format!("output is a directory: {}", self.output.display()),
            );
        }

        if !self.scan.starts_with(&self.public) {
            diag.warn(
                Self::FIELD_SCAN,
                format!(
                    "scan root {} is outside public root {}, local paths will contain `..`",
                    self.scan.display(),
                    self.public.display()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_defaults() {
        let paths = PathsConfig::default();
        assert_eq!(paths.public, PathBuf::from("public"));
        assert_eq!(paths.scan, PathBuf::from("public/MEDIAWEB"));
        assert_eq!(paths.output, PathBuf::from("build/all-media-manifest.json"));
    }

    #[test]
    fn test_paths_normalize() {
        let mut paths = PathsConfig::default();
        paths.normalize(Path::new("/nonexistent/site"));
        assert_eq!(paths.public, PathBuf::from("/nonexistent/site/public"));
        assert_eq!(paths.scan, PathBuf::from("/nonexistent/site/public/MEDIAWEB"));
        assert_eq!(
            paths.output,
            PathBuf::from("/nonexistent/site/build/all-media-manifest.json")
        );
    }

    #[test]
    fn test_scan_outside_public_warns() {
        let paths = PathsConfig {
            public: "/nonexistent/site/public".into(),
            scan: "/nonexistent/media".into(),
            output: "/nonexistent/site/build/m.json".into(),
        };
        let mut diag = ConfigDiagnostics::new();
        paths.validate(&mut diag);
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
    }
}
