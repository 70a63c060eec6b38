//! Per-folder metadata readers
//!
//! Each folder may carry a handful of small control files next to its content:
//! a description, a thumbnail, and three name lists (references, highlights,
//! ignores). The readers here load one folder's files and know nothing about
//! other folders.
//!
//! All text is decoded leniently: invalid UTF-8 becomes U+FFFD instead of
//! failing the build.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use glob::{MatchOptions, Pattern};

use crate::error::{ManifestError, Result};
use crate::manifest::ManifestConfig;

const BOM: char = '\u{feff}';

/// Read a text file, replacing invalid UTF-8 sequences.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_text_lossy(path: &Path) -> Result<Option<String>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ManifestError::read(path, e)),
    }
}

/// Read a one-name-per-line control file. Blank lines are dropped and every
/// name is trimmed.
pub fn read_name_list(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let Some(text) = read_text_lossy(path)? else {
        return Ok(Vec::new());
    };
    Ok(text
        .trim_start_matches(BOM)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Load the folder description, trimmed. Empty descriptions count as absent.
pub fn read_description(dir: &Path, config: &ManifestConfig) -> Result<Option<String>> {
    let path = dir.join(&config.description_file);
    if !path.is_file() {
        return Ok(None);
    }
    let desc = read_text_lossy(&path)?
        .map(|text| text.trim_start_matches(BOM).trim().to_string())
        .filter(|text| !text.is_empty());
    Ok(desc)
}

/// Names of the entries of `dir`, sorted. Any error while listing is fatal.
pub fn entry_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
                .collect::<io::Result<Vec<_>>>()
        })
        .map_err(|e| ManifestError::read(dir, e))?;
    names.sort();
    Ok(names)
}

/// Find the folder thumbnail. Extensions match in any case and are ranked
/// in configured order; the first ranked file wins.
pub fn find_thumbnail(dir: &Path, config: &ManifestConfig) -> Result<Option<String>> {
    let thumbnail = entry_names(dir)?
        .into_iter()
        .filter(|name| dir.join(name).is_file())
        .filter_map(|name| config.thumbnail_rank(&name).map(|rank| (rank, name)))
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, name)| name);
    Ok(thumbnail)
}

/// Case-insensitive set of entry names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet(HashSet<String>);

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str) {
        self.0.insert(name.to_lowercase());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    pub fn extend(&mut self, other: &NameSet) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn union(&self, other: &NameSet) -> NameSet {
        let mut merged = self.clone();
        merged.extend(other);
        merged
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> FromIterator<&'a str> for NameSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = NameSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// A folder's highlight list after validation.
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    /// Names that resolved to a sibling; these get the star.
    pub active: NameSet,
    /// Names that did not resolve, in file order.
    pub missing: Vec<String>,
}

/// Read and validate a folder's highlight list.
///
/// A name is valid if it matches (in any case) an entry of `dir` or one of
/// `virtual_names`, the file names of content the folder pulls in through
/// its reference list.
pub fn read_highlights(
    dir: &Path,
    config: &ManifestConfig,
    virtual_names: &[String],
) -> Result<Highlights> {
    let mut highlights = Highlights::default();
    let names = read_name_list(&dir.join(&config.highlights_file))?;
    if names.is_empty() {
        return Ok(highlights);
    }

    let mut siblings: NameSet = virtual_names.iter().map(String::as_str).collect();
    for entry in entry_names(dir)? {
        siblings.insert(&entry);
    }

    for name in names {
        if siblings.contains(&name) {
            highlights.active.insert(&name);
        } else {
            highlights.missing.push(name);
        }
    }
    Ok(highlights)
}

/// A folder's ignore list. Every line matches as a plain name in any case.
/// A line containing `*` or `?` is also matched as a glob pattern, where
/// `[...]` classes are allowed; other lines are never globbed.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    names: NameSet,
    patterns: Vec<Pattern>,
}

impl IgnoreList {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut list = IgnoreList::default();
        for name in names {
            let name = name.as_ref();
            list.names.insert(name);
            if name.contains(['*', '?']) {
                if let Ok(pattern) = Pattern::new(name) {
                    list.patterns.push(pattern);
                }
            }
        }
        list
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        if self.names.contains(name) {
            return true;
        }
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        self.patterns
            .iter()
            .any(|p| p.matches_with(name, options))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Read a folder's ignore list.
pub fn read_ignore_list(dir: &Path, config: &ManifestConfig) -> Result<IgnoreList> {
    let names = read_name_list(&dir.join(&config.ignore_file))?;
    Ok(IgnoreList::from_names(&names))
}
