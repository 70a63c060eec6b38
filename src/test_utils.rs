//! Test utilities for creating temporary content trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::CompressionMethod;
use zip::write::FileOptions;

/// A temporary directory acting as a manifest root.
///
/// Paths passed to the `add_*` methods are relative to the root and use `/`.
/// Parent directories are created as needed. The tree is removed on drop.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary tree.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the root of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a text file.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    /// Add a file with raw content.
    pub fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.prepare(path);
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a zip archive. Entries ending in `/` become directories, all
    /// other entries get a few bytes of content.
    pub fn add_zip(&self, path: &str, entries: &[&str]) -> PathBuf {
        let full_path = self.prepare(path);
        let file = File::create(&full_path).expect("Failed to create archive");
        let mut zip = zip::ZipWriter::new(file);
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for &name in entries {
            if name.ends_with('/') {
                zip.add_directory(name.trim_end_matches('/'), options)
                    .expect("Failed to add zip directory");
            } else {
                zip.start_file(name, options).expect("Failed to add zip entry");
                zip.write_all(b"demo").expect("Failed to write zip entry");
            }
        }

        zip.finish().expect("Failed to finish archive");
        full_path
    }

    /// Add an internet shortcut pointing at `url`.
    pub fn add_shortcut(&self, path: &str, url: &str) -> PathBuf {
        self.add_file(path, &format!("[InternetShortcut]\r\nURL={}\r\n", url))
    }

    fn prepare(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        full_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
