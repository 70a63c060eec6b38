//! Reference resolution
//!
//! A folder's reference list pulls content from elsewhere in the tree into
//! the folder's listing. Referenced nodes keep the path of their target, so
//! the manifest aliases content instead of copying it.

use tracing::debug;

use crate::classify::classify_file;
use crate::error::Result;
use crate::metadata::{NameSet, read_name_list};
use crate::report::{BuildReport, ReferenceProblem};

use super::node::ManifestNode;
use super::utils::normalize_reference;
use super::walker::{Ancestors, FolderContext, ManifestBuilder};

impl ManifestBuilder {
    /// Resolve the reference lines declared by the folder `ctx`.
    ///
    /// Lines are resolved against the manifest root. A referenced node is
    /// starred if its file name appears in the declaring folder's highlights
    /// or in the highlights of the target's own parent folder.
    pub(super) fn resolve_references(
        &self,
        ctx: &FolderContext,
        lines: &[String],
        declaring_highlights: &NameSet,
        ancestors: &mut Ancestors,
        report: &mut BuildReport,
    ) -> Result<Vec<ManifestNode>> {
        let mut nodes = Vec::new();

        for line in lines {
            let Some(rel) = normalize_reference(line) else {
                report.record_reference(ctx.rel(), line.as_str(), ReferenceProblem::OutsideRoot);
                continue;
            };
            let target = FolderContext::new(rel);
            let path = target.abs_path(self.root());
            if !path.exists() {
                report.record_reference(ctx.rel(), line.as_str(), ReferenceProblem::Missing);
                continue;
            }

            let stars = declaring_highlights.union(&self.parent_highlights(&target)?);
            let star = stars.contains(target.raw_name());

            if path.is_dir() {
                if ancestors.contains(&self.canonical(&path)?) {
                    report.record_reference(ctx.rel(), line.as_str(), ReferenceProblem::Cycle);
                    continue;
                }
                match self.build_folder_node(&target, ancestors, report)? {
                    Some(folder) => {
                        let mut node = ManifestNode::Folder(folder);
                        node.set_reference();
                        node.set_star(star);
                        nodes.push(node);
                    }
                    None => debug!(
                        folder = ctx.rel(),
                        reference = target.rel(),
                        "referenced folder is empty"
                    ),
                }
            } else {
                for item in classify_file(&path, target.rel(), self.config())? {
                    let mut node = ManifestNode::Item(item);
                    node.set_reference();
                    node.set_star(star);
                    nodes.push(node);
                }
            }
        }

        Ok(nodes)
    }

    /// Active highlights of the folder containing `target`. Problems in that
    /// list are reported when the folder itself is built, not here.
    fn parent_highlights(&self, target: &FolderContext) -> Result<NameSet> {
        let parent = match target.rel().rsplit_once('/') {
            Some((parent, _)) => FolderContext::new(parent),
            None => FolderContext::root(),
        };
        let dir = parent.abs_path(self.root());
        let references = read_name_list(&dir.join(&self.config().references_file))?;
        Ok(self.highlights_with_references(&dir, &references)?.active)
    }
}
