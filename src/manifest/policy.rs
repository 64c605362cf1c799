//! Bucket-relative path derivation.
//!
//! Each bucket owns a [`PathPolicy`] describing how its objects were laid
//! out when uploaded. Policies are looked up by bucket id, so adding a
//! bucket is a single table entry.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use super::ManifestError;
use crate::utils::path::{file_name_str, relative_path, to_slash};

/// How a bucket's object keys relate to local paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPolicy {
    /// Objects are stored flat, keyed by file name.
    Flat,
    /// Objects are keyed by their path below this absolute root.
    Rooted(PathBuf),
}

impl PathPolicy {
    /// Bucket-relative path of `path`, separators normalized.
    ///
    /// A rooted path outside its root is not rejected: the result climbs
    /// with `../` so the anomaly shows up in the manifest.
    pub fn resolve(&self, path: &Path) -> Result<String, ManifestError> {
        let raw = match self {
            Self::Flat => file_name_str(path)
                .map(str::to_string)
                .ok_or_else(|| ManifestError::NonUtf8Path(path.to_path_buf()))?,
            Self::Rooted(root) => to_slash(&relative_path(path, root))
                .ok_or_else(|| ManifestError::NonUtf8Path(path.to_path_buf()))?,
        };
        Ok(tidy_bucket_path(&raw))
    }
}

/// Replace `\` with `/` and strip a leading `./`.
pub fn tidy_bucket_path(raw: &str) -> String {
    let slashed = raw.replace('\\', "/");
    match slashed.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => slashed,
    }
}

/// Whether a bucket path escapes its bucket root.
#[inline]
pub fn is_misrooted(bucket_path: &str) -> bool {
    bucket_path == ".." || bucket_path.starts_with("../")
}

/// Bucket id -> policy.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    policies: FxHashMap<String, PathPolicy>,
}

impl PolicyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bucket: impl Into<String>, policy: PathPolicy) {
        self.policies.insert(bucket.into(), policy);
    }

    pub fn get(&self, bucket: &str) -> Option<&PathPolicy> {
        self.policies.get(bucket)
    }

    /// Resolve `path` with the policy of `bucket`.
    pub fn resolve(&self, path: &Path, bucket: &str) -> Result<String, ManifestError> {
        self.get(bucket)
            .ok_or_else(|| ManifestError::UnknownBucket(bucket.to_string()))?
            .resolve(path)
    }
}
