//! Manifest and diagnostics output
//!
//! - `json` - serializes the finished manifest
//! - `diagnostics` - renders collected build errors for the error stream

mod diagnostics;
mod json;

pub use diagnostics::{print_report, write_report};
pub use json::{print_manifest, to_json_pretty, write_manifest};
