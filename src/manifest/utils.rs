//! Shared helpers for building manifest nodes

use std::path::{Component, Path};

use super::node::ManifestNode;

/// Display name for a raw file or folder name: the last extension is
/// dropped and underscores become spaces.
///
/// ```
/// use fsmanifest::manifest::display_name;
///
/// assert_eq!(display_name("Space_Quest.zip"), "Space Quest");
/// assert_eq!(display_name("archive.tar.gz"), "archive.tar");
/// assert_eq!(display_name("My_Folder"), "My Folder");
/// ```
pub fn display_name(raw: &str) -> String {
    let stem = match raw.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => raw,
    };
    stem.replace('_', " ")
}

/// Join a root-relative POSIX path and a child name.
pub fn join_rel(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Normalize a reference line to a root-relative POSIX path.
///
/// Backslashes become slashes, surrounding slashes and `.` segments are
/// dropped. Returns `None` when the result is empty or would leave the root.
///
/// ```
/// use fsmanifest::manifest::normalize_reference;
///
/// assert_eq!(normalize_reference("\\games\\doom\\").as_deref(), Some("games/doom"));
/// assert_eq!(normalize_reference("../secret"), None);
/// ```
pub fn normalize_reference(raw: &str) -> Option<String> {
    let slashed = raw.trim().replace('\\', "/");
    let trimmed = slashed.trim_matches('/');
    let mut parts = Vec::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Sort a folder listing: folders first, then items, each group by
/// case-insensitive name. The sort is stable, so equal keys keep their
/// production order.
pub fn sort_nodes(nodes: &mut [ManifestNode]) {
    nodes.sort_by_cached_key(|node| (!node.is_folder(), node.name().to_lowercase()));
}
