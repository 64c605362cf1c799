//! Manifest configuration management for `bucketmap.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── bucket     # [[bucket]]
//! │   ├── paths      # [paths]
//! │   ├── report     # [report]
//! │   ├── scan       # [scan]
//! │   └── storage    # [storage]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config file discovery
//! └── mod.rs         # ManifestConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::{
    BucketConfig, PathsConfig, ReportConfig, ReportLevel, ScanConfig, StorageConfig,
    default_buckets,
};

// Re-export from types/
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing bucketmap.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Public root, scan root and output file
    pub paths: PathsConfig,

    /// Storage project and endpoint
    pub storage: StorageConfig,

    /// Walk settings
    pub scan: ScanConfig,

    /// Reporting levels for unmatched and misrooted files
    pub report: ReportConfig,

    /// Ordered bucket rules
    #[serde(rename = "bucket")]
    pub buckets: Vec<BucketConfig>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            paths: PathsConfig::default(),
            storage: StorageConfig::default(),
            scan: ScanConfig::default(),
            report: ReportConfig::default(),
            buckets: default_buckets(),
        }
    }
}

impl ManifestConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let config_path = find_config_file(&cli.config, &cwd)
            .ok_or_else(|| ConfigError::NotFound(cwd.join(&cli.config)))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = crate::utils::path::normalize_path(&config_path);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get path relative to the project root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root = crate::utils::path::normalize_path(&root);

        if let Commands::Build { args } = &cli.command {
            self.apply_build_args(args);
        }

        let root = self.root.clone();
        self.paths.normalize(&root);
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.paths.scan, args.scan.as_ref());
        Self::update_option(&mut self.paths.output, args.output.as_ref());
        Self::update_option(&mut self.report.unmatched, args.unmatched.as_ref());
        Self::update_option(&mut self.report.misrooted, args.misrooted.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the finalized configuration, printing warnings and returning
    /// all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.paths.validate(&mut diag);
        self.storage.validate(&mut diag);
        self.scan.validate(&mut diag);
        section::validate_buckets(&self.buckets, &mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ManifestConfig {
    let (parsed, ignored) = ManifestConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Build a finalized config rooted at `root` without touching the CLI.
#[cfg(test)]
pub fn test_config_at(root: &Path, content: &str) -> ManifestConfig {
    let mut config = test_parse_config(content);
    config.root = crate::utils::path::normalize_path(root);
    config.config_path = config.root.join("bucketmap.toml");
    let root = config.root.clone();
    config.paths.normalize(&root);
    config
}

// ============================================================================
// tests
// ============================================================================
