//! Error types for recon-cipher

use std::path::PathBuf;

/// Result type for recon-cipher operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in recon-cipher operations
///
/// Key contents are never included in messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Key must be 32 or 64 hexadecimal characters")]
    InvalidKey,

    #[error("Key must be an absolute path to a key file, or the raw hex key string")]
    InvalidKeySource,

    #[error("Key must be 16 or 32 bytes, got {len}")]
    InvalidKeyLength { len: usize },

    #[error("Label must be 6 hexadecimal characters, got {label:?}")]
    InvalidLabel { label: String },

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
