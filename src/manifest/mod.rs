//! Media manifest generation.
//!
//! Pipeline per file:
//!
//! ```text
//! walk_files ─▶ Classifier::classify ─▶ PolicyTable::resolve ─▶ build_public_url ─▶ ManifestRecord
//!                    │ no match
//!                    ▼
//!                unmatched
//! ```
//!
//! The whole manifest is collected in memory and written once at the end.

mod classify;
mod policy;
mod public_url;
mod scan;
mod write;


pub use classify::{BucketRule, Classifier};
pub use policy::{PathPolicy, PolicyTable, is_misrooted};
pub use public_url::build_public_url;
pub use scan::walk_files;
pub use write::write_manifest;

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ManifestConfig;
use crate::utils::path::{file_name_str, relative_path, to_slash};

// ============================================================================
// Errors
// ============================================================================

/// Errors that abort a manifest run
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("scan root `{}` is not a directory", .0.display())]
    MissingScanRoot(PathBuf),

    #[error("failed to walk `{}`", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: jwalk::Error,
    },

    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("no path policy for bucket `{0}`")]
    UnknownBucket(String),

    #[error("IO error when writing `{}`", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to serialize manifest")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Records
// ============================================================================

/// One manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRecord {
    /// Path below the public root, `/`-separated, with a leading `/`
    pub local_path: String,
    /// `{base}/{bucket}/{bucket path}`, segment-wise percent-encoded
    pub public_url: String,
    /// File name, unencoded
    pub name: String,
    /// Bucket id
    pub bucket: String,
    /// Path inside the bucket, unencoded
    pub bucket_path: String,
}

// ============================================================================
// Mapper
// ============================================================================

/// Maps absolute file paths to manifest records.
#[derive(Debug, Clone)]
pub struct MediaMapper {
    classifier: Classifier,
    policies: PolicyTable,
    public_root: PathBuf,
    base_url: String,
}

impl MediaMapper {
    pub fn new(
        classifier: Classifier,
        policies: PolicyTable,
        public_root: impl Into<PathBuf>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            policies,
            public_root: public_root.into(),
            base_url: base_url.into(),
        }
    }

    /// Build rules and policies from the bucket table. Bucket roots are
    /// anchored at the scan root.
    pub fn from_config(config: &ManifestConfig) -> Self {
        let mut rules = Vec::with_capacity(config.buckets.len());
        let mut policies = PolicyTable::new();

        for bucket in &config.buckets {
            rules.push(BucketRule::new(&bucket.name, &bucket.pattern));
            let policy = match &bucket.root {
                Some(root) => PathPolicy::Rooted(config.paths.scan.join(root)),
                None => PathPolicy::Flat,
            };
            policies.insert(&bucket.name, policy);
        }

        Self::new(
            Classifier::new(rules),
            policies,
            &config.paths.public,
            config.storage.base_url(),
        )
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Map one absolute file path. `Ok(None)` means no bucket rule matched.
    pub fn map_file(&self, path: &Path) -> Result<Option<ManifestRecord>, ManifestError> {
        let full = path
            .to_str()
            .ok_or_else(|| ManifestError::NonUtf8Path(path.to_path_buf()))?;

        let Some(bucket) = self.classifier.classify(full) else {
            return Ok(None);
        };

        let bucket_path = self.policies.resolve(path, bucket)?;
        let name = file_name_str(path)
            .ok_or_else(|| ManifestError::NonUtf8Path(path.to_path_buf()))?;
        let local = to_slash(&relative_path(path, &self.public_root))
            .ok_or_else(|| ManifestError::NonUtf8Path(path.to_path_buf()))?;

        Ok(Some(ManifestRecord {
            local_path: format!("/{local}"),
            public_url: build_public_url(&self.base_url, bucket, &bucket_path),
            name: name.to_string(),
            bucket: bucket.to_string(),
            bucket_path,
        }))
    }
}

// ============================================================================
// Manifest
// ============================================================================

/// Records of one run plus what was left out of them.
#[derive(Debug, Default)]
pub struct Manifest {
    /// Records in traversal order
    pub records: Vec<ManifestRecord>,
    /// Number of files considered (after the ignore list)
    pub scanned: usize,
    /// Files matching no bucket rule
    pub unmatched: Vec<PathBuf>,
    /// Files whose bucket path climbs out of the bucket root (still recorded)
    pub misrooted: Vec<PathBuf>,
}

impl Manifest {
    /// Map every file. The first error aborts the whole collection.
    pub fn collect<I>(mapper: &MediaMapper, files: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = Result<PathBuf, ManifestError>>,
    {
        let mut manifest = Self::default();

        for file in files {
            let path = file?;
            manifest.scanned += 1;

            match mapper.map_file(&path)? {
                Some(record) => {
                    if is_misrooted(&record.bucket_path) {
                        manifest.misrooted.push(path);
                    }
                    manifest.records.push(record);
                }
                None => manifest.unmatched.push(path),
            }
        }

        Ok(manifest)
    }

    /// Record count per bucket, in rule order.
    pub fn bucket_counts<'a>(&self, classifier: &'a Classifier) -> Vec<(&'a str, usize)> {
        classifier
            .rules()
            .iter()
            .map(|rule| {
                let count = self
                    .records
                    .iter()
                    .filter(|r| r.bucket == rule.bucket)
                    .count();
                (rule.bucket.as_str(), count)
            })
            .collect()
    }
}

/// Scan the configured tree and collect its manifest.
pub fn build_manifest(
    config: &ManifestConfig,
    mapper: &MediaMapper,
) -> Result<Manifest, ManifestError> {
    let scan_root = &config.paths.scan;
    if !scan_root.is_dir() {
        return Err(ManifestError::MissingScanRoot(scan_root.clone()));
    }

    Manifest::collect(mapper, walk_files(scan_root, &config.scan))
}
