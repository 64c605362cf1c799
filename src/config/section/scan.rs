//! `[scan]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scan]
//! ignore = [".DS_Store", "Thumbs.db"]   # file names skipped before classification
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Exact file names to skip. Skipped files count as neither matched
    /// nor unmatched.
    pub ignore: Vec<String>,
}

impl ScanConfig {
    pub const FIELD_IGNORE: FieldPath = FieldPath::new("scan.ignore");

    /// Check whether a file name is on the ignore list.
    #[inline]
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore.iter().any(|name| name == file_name)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for name in &self.ignore {
            if name.contains(['/', '\\']) {
                diag.warn(
                    Self::FIELD_IGNORE,
                    format!("`{name}` contains a separator and will never match a file name"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ignored_exact_name() {
        let scan = ScanConfig {
            ignore: vec![".DS_Store".into()],
        };
        assert!(scan.is_ignored(".DS_Store"));
        assert!(!scan.is_ignored("a.DS_Store"));
        assert!(!ScanConfig::default().is_ignored(".DS_Store"));
    }

    #[test]
    fn test_separator_in_ignore_warns() {
        let scan = ScanConfig {
            ignore: vec!["TOURS/tmp.jpg".into()],
        };
        let mut diag = ConfigDiagnostics::new();
        scan.validate(&mut diag);
        assert_eq!(diag.warnings().len(), 1);
    }
}
