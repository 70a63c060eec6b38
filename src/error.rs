//! Error types for manifest building

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unrecoverable failures. Missing references, missing highlights and
/// unusable entries are not errors at this level; they land in a
/// [`BuildReport`](crate::report::BuildReport) instead.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest root '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ManifestError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ManifestError> = std::result::Result<T, E>;
