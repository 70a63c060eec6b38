//! ManifestBuilder - recursive folder walk producing the manifest tree

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::classify::classify_file;
use crate::error::{ManifestError, Result};
use crate::metadata::{
    Highlights, find_thumbnail, read_description, read_highlights, read_ignore_list,
    read_name_list,
};
use crate::report::BuildReport;

use super::config::ManifestConfig;
use super::node::{Folder, Manifest, ManifestNode};
use super::utils::{display_name, join_rel, normalize_reference, sort_nodes};

/// A folder being built: its root-relative POSIX path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderContext {
    rel: String,
}

impl FolderContext {
    pub fn root() -> Self {
        Self { rel: String::new() }
    }

    pub fn new(rel: impl Into<String>) -> Self {
        Self { rel: rel.into() }
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// Last path segment, or empty for the root.
    pub fn raw_name(&self) -> &str {
        self.rel.rsplit('/').next().unwrap_or_default()
    }

    pub fn child(&self, name: &str) -> Self {
        Self {
            rel: join_rel(&self.rel, name),
        }
    }

    pub fn abs_path(&self, root: &Path) -> PathBuf {
        if self.rel.is_empty() {
            root.to_path_buf()
        } else {
            root.join(&self.rel)
        }
    }
}

/// Canonical paths of the folders currently under construction.
#[derive(Debug, Default)]
pub(super) struct Ancestors(Vec<PathBuf>);

impl Ancestors {
    pub(super) fn contains(&self, canonical: &Path) -> bool {
        self.0.iter().any(|p| p == canonical)
    }
}

/// Builds the manifest for one directory tree.
///
/// Every call walks the current on-disk state from scratch; nothing is
/// cached between builds.
pub struct ManifestBuilder {
    root: PathBuf,
    config: ManifestConfig,
}

impl ManifestBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: ManifestConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ManifestConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ManifestConfig {
        &self.config
    }

    /// Build the whole manifest. The root folder contributes only its items.
    pub fn build(&self) -> Result<(Manifest, BuildReport)> {
        if !self.root.is_dir() {
            return Err(ManifestError::NotADirectory(self.root.clone()));
        }
        info!(root = %self.root.display(), "building manifest");

        let mut report = BuildReport::new();
        let mut ancestors = Ancestors::default();
        let items = self.build_items(&FolderContext::root(), &mut ancestors, &mut report)?;

        info!(
            items = items.len(),
            errors = report.len(),
            "manifest built"
        );
        Ok((Manifest { items }, report))
    }

    /// Build the folder at `rel_path` (root-relative, POSIX separators).
    ///
    /// Returns `None` when the folder would have no items.
    pub fn build_folder(&self, rel_path: &str, report: &mut BuildReport) -> Result<Option<Folder>> {
        let ctx = match normalize_reference(rel_path) {
            Some(rel) => FolderContext::new(rel),
            None => FolderContext::root(),
        };
        self.build_folder_node(&ctx, &mut Ancestors::default(), report)
    }

    pub(super) fn build_folder_node(
        &self,
        ctx: &FolderContext,
        ancestors: &mut Ancestors,
        report: &mut BuildReport,
    ) -> Result<Option<Folder>> {
        let items = self.build_items(ctx, ancestors, report)?;
        if items.is_empty() {
            debug!(folder = ctx.rel(), "empty folder, pruned");
            return Ok(None);
        }

        let dir = ctx.abs_path(&self.root);
        let mut folder = Folder::new(display_name(ctx.raw_name()), ctx.rel(), items);
        folder.image = find_thumbnail(&dir, &self.config)?;
        folder.desc = read_description(&dir, &self.config)?;
        Ok(Some(folder))
    }

    pub(super) fn canonical(&self, dir: &Path) -> Result<PathBuf> {
        dir.canonicalize().map_err(|e| ManifestError::read(dir, e))
    }

    fn build_items(
        &self,
        ctx: &FolderContext,
        ancestors: &mut Ancestors,
        report: &mut BuildReport,
    ) -> Result<Vec<ManifestNode>> {
        let dir = ctx.abs_path(&self.root);
        ancestors.0.push(self.canonical(&dir)?);
        let result = self.collect_items(ctx, &dir, ancestors, report);
        ancestors.0.pop();
        result
    }

    fn collect_items(
        &self,
        ctx: &FolderContext,
        dir: &Path,
        ancestors: &mut Ancestors,
        report: &mut BuildReport,
    ) -> Result<Vec<ManifestNode>> {
        debug!(folder = ctx.rel(), "building folder");

        let references = read_name_list(&dir.join(&self.config.references_file))?;
        let highlights = self.highlights_with_references(dir, &references)?;
        for name in &highlights.missing {
            report.record_highlight(ctx.rel(), name.as_str());
        }
        let ignore = read_ignore_list(dir, &self.config)?;

        let mut items =
            self.resolve_references(ctx, &references, &highlights.active, ancestors, report)?;

        let mut entries = std::fs::read_dir(dir)
            .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
            .map_err(|e| ManifestError::read(dir, e))?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            // Manifest paths are UTF-8.
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    debug!(folder = ctx.rel(), entry = ?raw, "non-UTF-8 name, skipped");
                    continue;
                }
            };
            if self.should_skip(&name) || ignore.is_ignored(&name) {
                debug!(folder = ctx.rel(), entry = %name, "skipped");
                continue;
            }

            let path = entry.path();
            let star = highlights.active.contains(&name);
            if path.is_dir() {
                if name == self.config.thumbnail_cache_dir {
                    continue;
                }
                if ancestors.contains(&self.canonical(&path)?) {
                    debug!(folder = ctx.rel(), entry = %name, "directory loop, skipped");
                    continue;
                }
                if let Some(mut folder) =
                    self.build_folder_node(&ctx.child(&name), ancestors, report)?
                {
                    folder.star = star;
                    items.push(ManifestNode::Folder(folder));
                }
            } else if path.is_file() {
                let rel = join_rel(ctx.rel(), &name);
                for mut item in classify_file(&path, &rel, &self.config)? {
                    item.star = star;
                    items.push(ManifestNode::Item(item));
                }
            }
        }

        sort_nodes(&mut items);
        Ok(items)
    }

    /// Entries that never appear natively, whatever the ignore list says.
    fn should_skip(&self, name: &str) -> bool {
        name == self.config.output_name
            || name.starts_with(self.config.hidden_prefix)
            || self.config.is_control_file(name)
            || self.config.is_thumbnail_file(name)
    }

    /// Read a folder's highlights, accepting names of referenced content as
    /// valid siblings.
    pub(super) fn highlights_with_references(
        &self,
        dir: &Path,
        references: &[String],
    ) -> Result<Highlights> {
        let virtual_names: Vec<String> = references
            .iter()
            .filter_map(|line| normalize_reference(line))
            .filter_map(|rel| rel.rsplit('/').next().map(String::from))
            .collect();
        read_highlights(dir, &self.config, &virtual_names)
    }
}
