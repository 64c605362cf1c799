//! Resolve command: map individual paths without scanning.
//!
//! Paths need not exist. Each input yields one JSON object: the manifest
//! record when a bucket rule matches, otherwise `{"path": ..., "bucket": null}`.

use anyhow::Result;
use serde_json::{Map, Value as JsonValue, json};
use std::io::{self, Write};
use std::path::Path;

use crate::cli::ResolveArgs;
use crate::config::ManifestConfig;
use crate::manifest::MediaMapper;
use crate::utils::path::normalize_path;

pub fn run_resolve(args: &ResolveArgs, config: &ManifestConfig) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_resolved(&mut stdout, args, config)
}

/// Stdout carries only the JSON array so the output can be piped.
fn write_resolved<W: Write>(
    out: &mut W,
    args: &ResolveArgs,
    config: &ManifestConfig,
) -> Result<()> {
    let mapper = MediaMapper::from_config(config);
    let results = resolve_paths(&mapper, &args.paths)?;

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    writeln!(out, "{formatted}")?;
    out.flush()?;
    Ok(())
}

/// Map every path, in input order.
fn resolve_paths<P: AsRef<Path>>(mapper: &MediaMapper, paths: &[P]) -> Result<JsonValue> {
    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        let path = normalize_path(path.as_ref());
        let value = match mapper.map_file(&path)? {
            Some(record) => serde_json::to_value(record)?,
            None => unmatched(&path),
        };
        results.push(value);
    }

    Ok(JsonValue::Array(results))
}

fn unmatched(path: &Path) -> JsonValue {
    let mut obj = Map::new();
    obj.insert("path".to_string(), json!(path.to_string_lossy()));
    obj.insert("bucket".to_string(), JsonValue::Null);
    JsonValue::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_matched_and_unmatched() {
        let temp = TempDir::new().unwrap();
        let config = test_config_at(temp.path(), "[storage]\nproject = \"proj\"");
        let mapper = MediaMapper::from_config(&config);

        let tour = config.paths.scan.join("TOURS/Open Tours/a b.jpg");
        let other = config.paths.scan.join("misc/logo.svg");
        let results = resolve_paths(&mapper, &[tour, other.clone()]).unwrap();

        assert_eq!(results[0]["bucket"], "Tours");
        assert_eq!(results[0]["bucketPath"], "Open Tours/a b.jpg");
        assert_eq!(results[0]["localPath"], "/MEDIAWEB/TOURS/Open Tours/a b.jpg");
        assert_eq!(
            results[0]["publicUrl"],
            "https://proj.supabase.co/storage/v1/object/public/Tours/Open%20Tours/a%20b.jpg"
        );

        assert!(results[1]["bucket"].is_null());
        assert_eq!(results[1]["path"], other.to_string_lossy().as_ref());
    }

    #[test]
    fn test_resolve_output_is_valid_json() {
        let temp = TempDir::new().unwrap();
        let config = test_config_at(temp.path(), "[storage]\nproject = \"proj\"");
        let args = ResolveArgs {
            paths: vec![
                config.paths.scan.join("TOURS/a.jpg"),
                config.paths.scan.join("x/b.jpg"),
            ],
            pretty: false,
        };

        let mut out = Vec::new();
        write_resolved(&mut out, &args, &config).unwrap();

        let text = String::from_utf8(out).unwrap();
        let parsed: JsonValue = serde_json::from_str(&text).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["bucket"], "Tours");
        assert!(entries[1]["bucket"].is_null());
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_resolve_keeps_input_order() {
        let temp = TempDir::new().unwrap();
        let config = test_config_at(temp.path(), "[storage]\nproject = \"proj\"");
        let mapper = MediaMapper::from_config(&config);

        let paths = [
            config.paths.scan.join("TOURS/z.jpg"),
            config.paths.scan.join("PDFS/a.pdf"),
        ];
        let results = resolve_paths(&mapper, &paths).unwrap();
        let names: Vec<_> = results
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["z.jpg", "a.pdf"]);
    }
}
