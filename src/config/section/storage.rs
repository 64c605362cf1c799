//! `[storage]` section configuration.
//!
//! Describes where uploaded buckets are publicly served from.
//!
//! # Example
//!
//! ```toml
//! [storage]
//! project = "wqpyfdxbkvvzjoniguld"
//! endpoint = "https://{project}.supabase.co/storage/v1/object/public"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Placeholder substituted with `storage.project`.
pub const PROJECT_PLACEHOLDER: &str = "{project}";

/// Storage project the built-in bucket table was uploaded to.
pub const DEFAULT_PROJECT: &str = "wqpyfdxbkvvzjoniguld";

/// Public object endpoint of a Supabase storage project.
pub const DEFAULT_ENDPOINT: &str = "https://{project}.supabase.co/storage/v1/object/public";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage project identifier.
    pub project: String,

    /// Endpoint template. `{project}` is replaced by `project`.
    pub endpoint: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl StorageConfig {
    pub const FIELD_PROJECT: FieldPath = FieldPath::new("storage.project");
    pub const FIELD_ENDPOINT: FieldPath = FieldPath::new("storage.endpoint");

    /// Base URL that bucket ids are appended to, without trailing slash.
    pub fn base_url(&self) -> String {
        self.endpoint
            .replace(PROJECT_PLACEHOLDER, &self.project)
            .trim_end_matches('/')
            .to_string()
    }

    /// Validate storage configuration.
    ///
    /// # Checks
    /// - `project` is required when the endpoint references `{project}`.
    /// - The expanded endpoint parses as an absolute http(s) URL without
    ///   query or fragment.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let project = self.project.trim();
        if self.endpoint.contains(PROJECT_PLACEHOLDER) && project.is_empty() {
            diag.error_with_hint(
                Self::FIELD_PROJECT,
                "project id is required by the endpoint template",
                "set `project` under [storage]",
            );
            return;
        }
        if project.contains(['/', '?', '#']) || project.chars().any(char::is_whitespace) {
            diag.error(
                Self::FIELD_PROJECT,
                format!("invalid project id `{}`", self.project),
            );
            return;
        }

        let base = self.base_url();
        match url::Url::parse(&base) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error(
                        Self::FIELD_ENDPOINT,
                        format!("unsupported scheme `{}`", parsed.scheme()),
                    );
                }
                if parsed.query().is_some() || parsed.fragment().is_some() {
                    diag.error(
                        Self::FIELD_ENDPOINT,
                        "endpoint must not contain a query or fragment",
                    );
                }
            }
            Err(e) => diag.error_with_hint(
                Self::FIELD_ENDPOINT,
                format!("invalid endpoint `{base}`: {e}"),
                "use an absolute URL such as https://host/storage/v1/object/public",
            ),
        }
    }
}
