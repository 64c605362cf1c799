//! Manifest persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use super::{ManifestError, ManifestRecord};

/// Write all records as one pretty-printed JSON array.
///
/// Missing parent directories are created. The file is written in one go
/// after serialization succeeds, so a failed run leaves no partial manifest.
pub fn write_manifest(records: &[ManifestRecord], output: &Path) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(records)?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ManifestError::Io(parent.to_path_buf(), e))?;
    }

    let mut file = fs::File::create(output).map_err(|e| ManifestError::Io(output.to_path_buf(), e))?;
    writeln!(file, "{json}").map_err(|e| ManifestError::Io(output.to_path_buf(), e))?;
    Ok(())
}
