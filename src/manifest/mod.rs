//! Manifest tree building
//!
//! `ManifestBuilder` walks a directory tree depth-first and turns it into a
//! [`Manifest`]. For every folder it:
//!
//! - reads the folder's highlight, ignore and reference lists
//! - resolves references into nodes that alias content elsewhere in the tree
//! - classifies native files and recurses into native subfolders
//! - sorts the listing and prunes the folder if nothing is left
//!
//! Problems with references and highlights are collected in a
//! [`BuildReport`](crate::report::BuildReport) returned next to the manifest.

mod config;
mod node;
mod references;
mod utils;
mod walker;

pub use config::ManifestConfig;
pub use node::{Folder, FolderTag, Item, Manifest, ManifestNode};
pub use utils::{display_name, join_rel, normalize_reference, sort_nodes};
pub use walker::{FolderContext, ManifestBuilder};
