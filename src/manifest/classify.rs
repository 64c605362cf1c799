//! Bucket classification.
//!
//! A file's bucket is decided by the first rule whose pattern occurs in its
//! absolute path. Matching is raw substring containment, so a pattern may hit
//! a directory name or a file name alike; rule order settles overlaps.

/// One `(bucket, pattern)` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRule {
    pub bucket: String,
    pub pattern: String,
}

impl BucketRule {
    pub fn new(bucket: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            pattern: pattern.into(),
        }
    }

    #[inline]
    pub fn matches(&self, path: &str) -> bool {
        path.contains(self.pattern.as_str())
    }
}

/// Ordered rule list, first match wins.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: Vec<BucketRule>,
}

impl Classifier {
    pub fn new(rules: Vec<BucketRule>) -> Self {
        Self { rules }
    }

    /// Bucket id of the first matching rule, or `None`.
    pub fn classify(&self, path: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.bucket.as_str())
    }

    pub fn rules(&self) -> &[BucketRule] {
        &self.rules
    }
}
