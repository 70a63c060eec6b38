//! Configuration types for the manifest builder

/// Names of the per-folder control files and other fixed markers the
/// builder recognizes.
#[derive(Debug, Clone)]
pub struct ManifestConfig {
    /// File name of the manifest itself; never listed in the tree.
    pub output_name: String,
    /// Entries whose name starts with this character are skipped.
    pub hidden_prefix: char,
    pub description_file: String,
    pub references_file: String,
    pub highlights_file: String,
    pub ignore_file: String,
    /// Basename of the folder thumbnail, probed against `thumbnail_extensions` in order.
    pub thumbnail_basename: String,
    pub thumbnail_extensions: Vec<String>,
    /// Folder holding generated thumbnails. Never traversed.
    pub thumbnail_cache_dir: String,
    /// Internal path prefix that marks a zip archive as runnable.
    pub executable_marker: String,
}

impl ManifestConfig {
    /// True if `name` is one of the metadata control files.
    pub fn is_control_file(&self, name: &str) -> bool {
        name == self.description_file
            || name == self.references_file
            || name == self.highlights_file
            || name == self.ignore_file
    }

    /// True if `name` is `<thumbnail_basename>.<ext>` for any recognized extension.
    pub fn is_thumbnail_file(&self, name: &str) -> bool {
        self.thumbnail_rank(name).is_some()
    }

    /// Position of the thumbnail's extension in `thumbnail_extensions`.
    /// The extension compares case-insensitively.
    pub fn thumbnail_rank(&self, name: &str) -> Option<usize> {
        let ext = name
            .strip_prefix(self.thumbnail_basename.as_str())?
            .strip_prefix('.')?
            .to_lowercase();
        self.thumbnail_extensions.iter().position(|e| *e == ext)
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            output_name: "filesystem.json".to_string(),
            hidden_prefix: '.',
            description_file: "folder.md".to_string(),
            references_file: "references.txt".to_string(),
            highlights_file: "highlights.txt".to_string(),
            ignore_file: "ignore.txt".to_string(),
            thumbnail_basename: "folder_image".to_string(),
            thumbnail_extensions: ["jpg", "jpeg", "png", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
            thumbnail_cache_dir: "_thumbs".to_string(),
            executable_marker: ".jsdos/".to_string(),
        }
    }
}
