//! `[[bucket]]` tables.
//!
//! Buckets are listed in priority order: a file belongs to the first bucket
//! whose `match` string occurs anywhere in its absolute path.
//!
//! # Example
//!
//! ```toml
//! [[bucket]]
//! name = "vidoe behind"
//! match = "tinta-behind-background-opt.webm"
//! # no `root`: the bucket is flat, objects are stored by file name
//!
//! [[bucket]]
//! name = "Tours"
//! match = "TOURS"
//! root = "TOURS"          # bucket root, relative to the scan root
//! ```
//!
//! Omitting every `[[bucket]]` table keeps the built-in table.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    /// Bucket identifier in the storage service.
    pub name: String,

    /// Literal substring selecting this bucket.
    #[serde(rename = "match")]
    pub pattern: String,

    /// Bucket root below the scan root. `None` means the bucket is flat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl BucketConfig {
    pub fn flat(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            root: None,
        }
    }

    pub fn rooted(name: &str, pattern: &str, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            root: Some(root.into()),
        }
    }
}

/// Built-in bucket table, in priority order.
pub fn default_buckets() -> Vec<BucketConfig> {
    vec![
        BucketConfig::flat("vidoe behind", "tinta-behind-background-opt.webm"),
        BucketConfig::rooted("ACTIVITITES", "activities_optimized", "activities_optimized"),
        BucketConfig::rooted("behind", "BEHIND_OPTIMIZED", "BEHIND_OPTIMIZED"),
        BucketConfig::rooted("MISC", "LANDING", "LANDING"),
        BucketConfig::rooted("pdf-prueba", "PDFS", "PDFS"),
        BucketConfig::rooted("Tours", "TOURS", "TOURS"),
    ]
}

/// Validate the bucket table.
///
/// # Checks
/// - At least one bucket.
/// - `name` and `match` are non-empty, names are unique.
/// - `root` is relative and never climbs with `..`.
pub fn validate_buckets(buckets: &[BucketConfig], diag: &mut ConfigDiagnostics) {
    if buckets.is_empty() {
        diag.error_with_hint(
            FieldPath::new("bucket"),
            "no bucket rules configured",
            "add a [[bucket]] table or remove the empty `bucket` array",
        );
        return;
    }

    let mut seen = FxHashSet::default();
    let mut seen_patterns: Vec<(usize, &str)> = Vec::new();

    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.name.is_empty() {
            diag.error(FieldPath::bucket(i, "name"), "bucket name must not be empty");
        } else if !seen.insert(bucket.name.as_str()) {
            diag.error(
                FieldPath::bucket(i, "name"),
                format!("duplicate bucket `{}`", bucket.name),
            );
        }

        if bucket.pattern.is_empty() {
            diag.error_with_hint(
                FieldPath::bucket(i, "match"),
                "match string must not be empty",
                "an empty string matches every file",
            );
        } else {
            // Anything containing this pattern already contains the earlier one.
            if let Some((earlier, _)) = seen_patterns
                .iter()
                .find(|(_, p)| bucket.pattern.contains(p))
            {
                diag.warn(
                    FieldPath::bucket(i, "match"),
                    format!(
                        "`{}` can never win: bucket[{earlier}] matches every path it matches",
                        bucket.pattern
                    ),
                );
            }
            seen_patterns.push((i, bucket.pattern.as_str()));
        }

        if let Some(root) = &bucket.root {
            validate_root(i, root, diag);
        }
    }
}

fn validate_root(index: usize, root: &Path, diag: &mut ConfigDiagnostics) {
    let field = FieldPath::bucket(index, "root");

    if root.as_os_str().is_empty() {
        diag.error_with_hint(
            field,
            "bucket root must not be empty",
            "omit `root` for flat buckets or use \".\" for the scan root",
        );
    } else if root.is_absolute() || root.has_root() {
        diag.error(
            field,
            format!("bucket root must be relative to the scan root: {}", root.display()),
        );
    } else if root.components().any(|c| c == Component::ParentDir) {
        diag.error(
            field,
            format!("bucket root must stay inside the scan root: {}", root.display()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_default_table_order() {
        let names: Vec<_> = default_buckets().into_iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            ["vidoe behind", "ACTIVITITES", "behind", "MISC", "pdf-prueba", "Tours"]
        );
    }

    #[test]
    fn test_default_table_is_valid() {
        let mut diag = ConfigDiagnostics::new();
        validate_buckets(&default_buckets(), &mut diag);
        assert!(diag.is_empty());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_parse_bucket_tables() {
        let config = test_parse_config(
            r#"[[bucket]]
name = "clips"
match = "intro.webm"

[[bucket]]
name = "Tours"
match = "TOURS"
root = "TOURS""#,
        );
        assert_eq!(
            config.buckets,
            vec![
                BucketConfig::flat("clips", "intro.webm"),
                BucketConfig::rooted("Tours", "TOURS", "TOURS"),
            ]
        );
    }

    #[test]
    fn test_missing_tables_keep_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.buckets, default_buckets());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        let buckets = vec![
            BucketConfig::flat("a", "x"),
            BucketConfig::flat("a", "y"),
            BucketConfig::flat("", ""),
        ];
        let mut diag = ConfigDiagnostics::new();
        validate_buckets(&buckets, &mut diag);
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_validate_rejects_escaping_roots() {
        let buckets = vec![
            BucketConfig::rooted("a", "a", "/abs"),
            BucketConfig::rooted("b", "b", "../up"),
            BucketConfig::rooted("c", "c", ""),
            BucketConfig::rooted("d", "d", "."),
        ];
        let mut diag = ConfigDiagnostics::new();
        validate_buckets(&buckets, &mut diag);
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_validate_warns_on_shadowed_pattern() {
        let buckets = vec![
            BucketConfig::flat("all-tours", "TOURS"),
            BucketConfig::flat("open-tours", "Open TOURS"),
        ];
        let mut diag = ConfigDiagnostics::new();
        validate_buckets(&buckets, &mut diag);
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_validate_empty_table() {
        let mut diag = ConfigDiagnostics::new();
        validate_buckets(&[], &mut diag);
        assert_eq!(diag.len(), 1);
    }
}
