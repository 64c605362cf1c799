//! Manifest build command.
//!
//! Phases:
//! - **Scan** - walk the scan root and map every file
//! - **Report** - apply `[report]` levels to unmatched and misrooted files
//! - **Write** - persist the manifest in one write

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::{
    config::{ManifestConfig, ReportLevel},
    debug, log,
    logger::is_verbose,
    manifest::{MediaMapper, build_manifest, write_manifest},
    utils::plural_count,
};

/// Build the manifest for the configured scan root.
pub fn build(config: &ManifestConfig) -> Result<()> {
    let mapper = MediaMapper::from_config(config);

    debug!("scan"; "scanning {}", config.paths.scan.display());
    let manifest = build_manifest(config, &mapper)?;

    debug!(
        "scan";
        "{} scanned, {} unmatched",
        plural_count(manifest.scanned, "file", "files"),
        manifest.unmatched.len()
    );
    if is_verbose() {
        for (bucket, count) in manifest.bucket_counts(mapper.classifier()) {
            log!("bucket"; "{}: {}", bucket, plural_count(count, "entry", "entries"));
        }
    }

    enforce_level(
        config,
        config.report.unmatched,
        "matched no bucket rule",
        &manifest.unmatched,
    )?;
    enforce_level(
        config,
        config.report.misrooted,
        "lies outside its bucket root",
        &manifest.misrooted,
    )?;

    let output = &config.paths.output;
    write_manifest(&manifest.records, output)
        .with_context(|| format!("failed to write manifest to {}", output.display()))?;

    log!(
        "manifest";
        "generated with {} at {}",
        plural_count(manifest.records.len(), "entry", "entries"),
        output.display()
    );
    Ok(())
}

/// Report a class of anomalous files at the configured level.
///
/// `Error` fails the run when any file is present, before anything is written.
fn enforce_level(
    config: &ManifestConfig,
    level: ReportLevel,
    what: &str,
    paths: &[PathBuf],
) -> Result<()> {
    if paths.is_empty() {
        return Ok(());
    }

    match level {
        ReportLevel::Ignore => {
            for path in paths {
                debug!("scan"; "{} {}", config.root_relative(path).display(), what);
            }
        }
        ReportLevel::Warn => {
            for path in paths {
                log!("warning"; "{} {}", config.root_relative(path).display(), what);
            }
        }
        ReportLevel::Error => {
            for path in paths {
                log!("error"; "{} {}", config.root_relative(path).display(), what);
            }
            bail!(
                "{} {}, no manifest written",
                plural_count(paths.len(), "file", "files"),
                what
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use std::fs;
    use tempfile::TempDir;

    fn make_site(files: &[&str], extra: &str) -> (TempDir, ManifestConfig) {
        let temp = TempDir::new().unwrap();
        let scan = temp.path().join("public/MEDIAWEB");
        fs::create_dir_all(&scan).unwrap();
        for rel in files {
            let path = scan.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"x").unwrap();
        }
        let config = test_config_at(
            temp.path(),
            &format!("[storage]\nproject = \"proj\"\n{extra}"),
        );
        (temp, config)
    }

    #[test]
    fn test_build_writes_manifest() {
        let (_temp, config) = make_site(&["TOURS/a.jpg", "other/b.jpg"], "");
        build(&config).unwrap();

        let content = fs::read_to_string(&config.paths.output).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["bucket"], "Tours");
        assert_eq!(entries[0]["bucketPath"], "a.jpg");
        assert_eq!(entries[0].as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_build_empty_tree_still_writes() {
        let (_temp, config) = make_site(&[], "");
        build(&config).unwrap();
        let content = fs::read_to_string(&config.paths.output).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn test_unmatched_error_level_writes_nothing() {
        let (_temp, config) = make_site(
            &["TOURS/a.jpg", "other/b.jpg"],
            "[report]\nunmatched = \"error\"",
        );
        let err = build(&config).unwrap_err();
        assert!(err.to_string().contains("1 file matched no bucket rule"));
        assert!(!config.paths.output.exists());
    }

    #[test]
    fn test_misrooted_error_level_writes_nothing() {
        let (_temp, config) =
            make_site(&["TOURS/LANDING/a.png"], "[report]\nmisrooted = \"error\"");
        assert!(build(&config).is_err());
        assert!(!config.paths.output.exists());
    }

    #[test]
    fn test_warn_levels_keep_going() {
        let (_temp, config) = make_site(
            &["TOURS/LANDING/a.png", "other/b.jpg"],
            "[report]\nunmatched = \"warn\"\nmisrooted = \"warn\"",
        );
        build(&config).unwrap();

        let content = fs::read_to_string(&config.paths.output).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["bucketPath"], "../TOURS/LANDING/a.png");
    }

    #[test]
    fn test_missing_scan_root_fails() {
        let temp = TempDir::new().unwrap();
        let config = test_config_at(temp.path(), "[storage]\nproject = \"proj\"");
        assert!(build(&config).is_err());
        assert!(!config.paths.output.exists());
    }
}
