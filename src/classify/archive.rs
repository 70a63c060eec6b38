//! Zip archive inspection

use std::fs::File;
use std::path::Path;

use tracing::debug;
use zip::read::ZipArchive;

/// True if any entry path inside the zip at `path` starts with `marker`
/// (case-insensitive).
///
/// Anything that keeps the archive from being read counts as "no marker";
/// the caller then lists it as a plain archive.
pub fn has_executable_marker(path: &Path, marker: &str) -> bool {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot open archive");
            return false;
        }
    };
    let archive = match ZipArchive::new(file) {
        Ok(a) => a,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot parse archive");
            return false;
        }
    };

    let marker = marker.to_lowercase();
    let marker_dir = marker.trim_end_matches('/');
    archive.file_names().any(|name| {
        let entry = name.replace('\\', "/").to_lowercase();
        let entry = entry.trim_start_matches('/');
        entry.starts_with(&marker) || entry == marker_dir
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::CompressionMethod;
    use zip::write::FileOptions;

    const MARKER: &str = ".jsdos/";

    #[test]
    fn detects_marker_directory() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("doom.jsdos");
        create_zip(&archive_path, &[".jsdos/", ".jsdos/dosbox.conf", "DOOM.EXE"]);

        assert!(has_executable_marker(&archive_path, MARKER));
    }

    #[test]
    fn marker_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("game.zip");
        create_zip(&archive_path, &[".JSDOS/DOSBOX.CONF", "GAME.EXE"]);

        assert!(has_executable_marker(&archive_path, MARKER));
    }

    #[test]
    fn ignores_archives_without_marker() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("photos.zip");
        create_zip(&archive_path, &["pics/", "pics/a.png", "jsdos/readme.txt", ".jsdosx/a"]);

        assert!(!has_executable_marker(&archive_path, MARKER));
    }

    #[test]
    fn unreadable_archive_has_no_marker() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("broken.zip");
        std::fs::write(&archive_path, b"PK\x03\x04 truncated").unwrap();

        assert!(!has_executable_marker(&archive_path, MARKER));
        assert!(!has_executable_marker(&dir.path().join("missing.zip"), MARKER));
    }

    fn create_zip(path: &Path, files: &[&str]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for &name in files {
            if name.ends_with('/') {
                zip.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                zip.start_file(name, options).unwrap();
                zip.write_all(b"demo").unwrap();
            }
        }

        zip.finish().unwrap();
    }
}
