//! Leaf entry classification
//!
//! A single extension table decides what a file becomes in the manifest.
//! Two kinds of file get a second look after the lookup:
//!
//! - zip containers are opened and, if they carry the executable marker
//!   directory, produce an extra `executable` item ahead of the `archive` one
//! - shortcut files are parsed and typed by the host of the URL they point to

mod archive;
mod shortcut;

pub use archive::has_executable_marker;
pub use shortcut::{classify_url, parse_shortcut, url_host};

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{ManifestError, Result};
use crate::manifest::{Item, ManifestConfig, display_name};

/// Manifest type of a leaf item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Wordpad,
    Notepad,
    Archive,
    Executable,
    Html,
    Sound,
    Image,
    Github,
    Youtube,
}

/// What the extension table says about a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Maps straight to a manifest type.
    Typed(ItemType),
    /// Zip container: an archive that may hide an executable bundle.
    ZipArchive,
    /// Internet shortcut; the type depends on the target URL.
    Shortcut,
}

impl FileKind {
    /// Look up an extension (without the dot, any case).
    ///
    /// Returns `None` for extensions the manifest has no type for.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsmanifest::classify::{FileKind, ItemType};
    ///
    /// assert_eq!(FileKind::from_extension("MD"), Some(FileKind::Typed(ItemType::Wordpad)));
    /// assert_eq!(FileKind::from_extension("zip"), Some(FileKind::ZipArchive));
    /// assert_eq!(FileKind::from_extension("url"), Some(FileKind::Shortcut));
    /// assert_eq!(FileKind::from_extension("exe"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        let kind = match ext.to_lowercase().as_str() {
            "md" | "markdown" => FileKind::Typed(ItemType::Wordpad),
            "txt" | "text" | "log" | "nfo" | "diz" | "ini" | "cfg" | "conf" | "csv" | "json"
            | "xml" | "yaml" | "yml" | "bat" | "cmd" | "sh" | "ps1" | "py" | "js" | "ts"
            | "c" | "h" | "cpp" | "rs" | "asm" | "bas" | "pas" => {
                FileKind::Typed(ItemType::Notepad)
            }
            "zip" | "jsdos" => FileKind::ZipArchive,
            "rar" | "7z" | "tar" | "gz" | "tgz" | "bz2" | "xz" => {
                FileKind::Typed(ItemType::Archive)
            }
            "html" | "htm" => FileKind::Typed(ItemType::Html),
            "mp3" | "wav" | "ogg" | "flac" | "m4a" | "aac" | "mid" | "midi" => {
                FileKind::Typed(ItemType::Sound)
            }
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "svg" => {
                FileKind::Typed(ItemType::Image)
            }
            "url" => FileKind::Shortcut,
            _ => return None,
        };
        Some(kind)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }
}

/// Classify one file into zero, one or two manifest items.
///
/// `path` is the file on disk, `rel_path` its root-relative POSIX path. An
/// empty result means the file is not shown: unknown extension or a
/// shortcut without a usable URL.
pub fn classify_file(path: &Path, rel_path: &str, config: &ManifestConfig) -> Result<Vec<Item>> {
    let Some(kind) = FileKind::from_path(path) else {
        debug!(path = rel_path, "unsupported extension, skipping");
        return Ok(Vec::new());
    };

    let raw_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = display_name(&raw_name);
    let size = path
        .metadata()
        .map_err(|e| ManifestError::read(path, e))?
        .len();

    let items = match kind {
        FileKind::Typed(item_type) => vec![Item::new(item_type, name, rel_path, size)],
        FileKind::ZipArchive => {
            let archive = Item::new(ItemType::Archive, name.clone(), rel_path, size);
            if has_executable_marker(path, &config.executable_marker) {
                vec![
                    Item::new(ItemType::Executable, name, rel_path, size),
                    archive,
                ]
            } else {
                vec![archive]
            }
        }
        FileKind::Shortcut => match shortcut::read_shortcut(path)? {
            Some(url) => {
                vec![Item::new(classify_url(&url), name, rel_path, size).with_url(url)]
            }
            None => {
                debug!(path = rel_path, "shortcut without a usable URL, skipping");
                Vec::new()
            }
        },
    };
    Ok(items)
}
