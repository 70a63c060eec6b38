//! fsmanifest - builds the JSON manifest of a virtual filesystem
//!
//! The manifest describes a directory tree for a front-end file browser:
//! folders, typed items, cross-folder references and highlight stars, all
//! driven by small control files that live next to the content.

pub mod classify;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod metadata;
pub mod output;
pub mod report;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use classify::{FileKind, ItemType, classify_file};
pub use error::{ManifestError, Result};
pub use manifest::{Folder, Item, Manifest, ManifestBuilder, ManifestConfig, ManifestNode};
pub use output::{print_manifest, print_report, to_json_pretty, write_manifest};
pub use report::{BuildReport, HighlightError, ReferenceError, ReferenceProblem};
