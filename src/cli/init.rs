//! Configuration file generation.
//!
//! Writes a commented `bucketmap.toml` holding the built-in defaults.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::config::{
    BucketConfig, PathsConfig, ReportConfig, ReportLevel, StorageConfig, default_buckets,
};
use crate::log;

/// Generate config content with comments
pub fn generate_config_template() -> String {
    let paths = PathsConfig::default();
    let storage = StorageConfig::default();
    let report = ReportConfig::default();

    let mut out = String::new();
    out.push_str(&format!(
        "# bucketmap configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    ));

    out.push_str("[paths]\n");
    out.push_str(&format!(
        "public = {}    # `localPath` is relative to this\n",
        quote(&paths.public.to_string_lossy())
    ));
    out.push_str(&format!(
        "scan = {}    # directory tree to scan\n",
        quote(&paths.scan.to_string_lossy())
    ));
    out.push_str(&format!(
        "output = {}\n\n",
        quote(&paths.output.to_string_lossy())
    ));

    out.push_str("[storage]\n");
    out.push_str(&format!(
        "project = {}    # storage project id\n",
        quote(&storage.project)
    ));
    out.push_str(&format!("endpoint = {}\n\n", quote(&storage.endpoint)));

    out.push_str("[scan]\n");
    out.push_str("ignore = []    # file names to skip, e.g. [\".DS_Store\"]\n\n");

    out.push_str("[report]\n");
    out.push_str(&format!(
        "unmatched = {}    # ignore | warn | error\n",
        quote(level_name(report.unmatched))
    ));
    out.push_str(&format!(
        "misrooted = {}    # ignore | warn | error\n",
        quote(level_name(report.misrooted))
    ));

    out.push_str("\n# Buckets in priority order: the first `match` found in a file path wins.\n");
    out.push_str("# Without `root` a bucket is flat and objects are stored by file name.\n");
    for bucket in default_buckets() {
        out.push('\n');
        out.push_str(&bucket_table(&bucket));
    }

    out
}

/// Write the template to `path`, or print it with `dry`.
pub fn init_config(path: &Path, dry: bool, force: bool) -> Result<()> {
    let content = generate_config_template();

    if dry {
        print!("{content}");
        return Ok(());
    }

    if path.exists() && !force {
        bail!(
            "config file '{}' already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}

fn bucket_table(bucket: &BucketConfig) -> String {
    let mut table = String::from("[[bucket]]\n");
    table.push_str(&format!("name = {}\n", quote(&bucket.name)));
    table.push_str(&format!("match = {}\n", quote(&bucket.pattern)));
    if let Some(root) = &bucket.root {
        table.push_str(&format!("root = {}\n", quote(&root.to_string_lossy())));
    }
    table
}

fn level_name(level: ReportLevel) -> &'static str {
    match level {
        ReportLevel::Ignore => "ignore",
        ReportLevel::Warn => "warn",
        ReportLevel::Error => "error",
    }
}

/// TOML string literal
fn quote(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{test_config_at, test_parse_config};
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = test_parse_config(&generate_config_template());
        assert_eq!(config.paths, PathsConfig::default());
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.report, ReportConfig::default());
        assert!(config.scan.ignore.is_empty());
        assert_eq!(config.buckets, default_buckets());
    }

    #[test]
    fn test_template_config_validates() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path(), &generate_config_template());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_template_keeps_bucket_order() {
        let template = generate_config_template();
        let tours = template.find("name = \"Tours\"").unwrap();
        let misc = template.find("name = \"MISC\"").unwrap();
        let video = template.find("name = \"vidoe behind\"").unwrap();
        assert!(video < misc && misc < tours);
    }

    #[test]
    fn test_init_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bucketmap.toml");

        init_config(&path, false, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), generate_config_template());
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bucketmap.toml");
        fs::write(&path, "# mine").unwrap();

        assert!(init_config(&path, false, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        init_config(&path, false, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[[bucket]]"));
    }

    #[test]
    fn test_init_dry_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bucketmap.toml");
        init_config(&path, true, false).unwrap();
        assert!(!path.exists());
    }
}
