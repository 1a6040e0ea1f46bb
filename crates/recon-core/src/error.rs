//! Error types for recon-core

use std::path::PathBuf;

/// Result type for recon-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in recon-core operations
///
/// Unreadable baselines, lookups through scalars, and undecryptable values
/// are not errors: they degrade toward rewriting the file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Host supplied a relative path where an absolute one is required
    #[error("File paths must be fully qualified, got {path}")]
    RelativePath { path: PathBuf },

    /// I/O failure other than a missing file
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Document error from recon-content
    #[error(transparent)]
    Content(#[from] recon_content::Error),

    /// Key or encryption error from recon-cipher
    #[error(transparent)]
    Cipher(#[from] recon_cipher::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
