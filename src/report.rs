//! Non-fatal problems collected during a build
//!
//! Broken references and highlights never stop the build. They are recorded
//! in a [`BuildReport`] that the builder threads through every folder and
//! hands back alongside the finished manifest.

use std::fmt;

use serde::Serialize;

/// Why a reference line produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceProblem {
    /// Nothing exists at the referenced path.
    Missing,
    /// The line cannot name anything under the manifest root.
    OutsideRoot,
    /// The target folder is already being built higher up the tree.
    Cycle,
}

impl fmt::Display for ReferenceProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ReferenceProblem::Missing => "not found",
            ReferenceProblem::OutsideRoot => "outside the manifest root",
            ReferenceProblem::Cycle => "reference cycle",
        };
        f.write_str(text)
    }
}

/// A reference line that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceError {
    /// Root-relative path of the folder declaring the reference.
    pub folder: String,
    /// The reference line as written.
    pub target: String,
    pub problem: ReferenceProblem,
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' ({})",
            folder_label(&self.folder),
            self.target,
            self.problem
        )
    }
}

/// A highlight line naming a sibling that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightError {
    /// Root-relative path of the folder declaring the highlight.
    pub folder: String,
    pub name: String,
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}' (not found)", folder_label(&self.folder), self.name)
    }
}

fn folder_label(folder: &str) -> &str {
    if folder.is_empty() { "." } else { folder }
}

/// Accumulator for one build.
///
/// A folder can be built more than once, natively and as a reference
/// target, and re-reads its control files each time. Entries are therefore
/// recorded once per distinct problem.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub reference_errors: Vec<ReferenceError>,
    pub highlight_errors: Vec<HighlightError>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_reference(
        &mut self,
        folder: impl Into<String>,
        target: impl Into<String>,
        problem: ReferenceProblem,
    ) {
        let error = ReferenceError {
            folder: folder.into(),
            target: target.into(),
            problem,
        };
        if self.reference_errors.contains(&error) {
            return;
        }
        tracing::warn!(
            folder = %error.folder,
            reference = %error.target,
            %problem,
            "unresolved reference"
        );
        self.reference_errors.push(error);
    }

    pub fn record_highlight(&mut self, folder: impl Into<String>, name: impl Into<String>) {
        let error = HighlightError {
            folder: folder.into(),
            name: name.into(),
        };
        if self.highlight_errors.contains(&error) {
            return;
        }
        tracing::warn!(folder = %error.folder, name = %error.name, "highlight target not found");
        self.highlight_errors.push(error);
    }

    /// Append another report's errors after this one's, skipping any
    /// already recorded.
    pub fn merge(&mut self, other: BuildReport) {
        for error in other.reference_errors {
            if !self.reference_errors.contains(&error) {
                self.reference_errors.push(error);
            }
        }
        for error in other.highlight_errors {
            if !self.highlight_errors.contains(&error) {
                self.highlight_errors.push(error);
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.reference_errors.is_empty() && self.highlight_errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reference_errors.len() + self.highlight_errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }
}
