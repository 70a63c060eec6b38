//! JSON output for the manifest

use std::io::{self, Write};
use std::path::Path;

use crate::error::{ManifestError, Result};
use crate::manifest::Manifest;

/// Render the manifest as pretty-printed JSON with a trailing newline.
/// Non-ASCII text is kept as is.
pub fn to_json_pretty(manifest: &Manifest) -> Result<String> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

impl Manifest {
    pub fn to_json_pretty(&self) -> Result<String> {
        to_json_pretty(self)
    }
}

/// Write the manifest to `path`.
///
/// The document goes to a sibling temporary file first and is then renamed
/// over `path`, so readers never see a half-written manifest.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let json = to_json_pretty(manifest)?;
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, json.as_bytes()).map_err(|e| ManifestError::write(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| ManifestError::write(path, e))?;
    Ok(())
}

/// Print the manifest to stdout.
pub fn print_manifest(manifest: &Manifest) -> Result<()> {
    let json = to_json_pretty(manifest)?;
    io::stdout()
        .lock()
        .write_all(json.as_bytes())
        .map_err(|e| ManifestError::write("<stdout>", e))
}
