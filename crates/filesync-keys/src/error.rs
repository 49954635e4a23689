//! Error types for filesync-keys

use std::path::PathBuf;

/// Result type for filesync-keys operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in filesync-keys operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Keychain path does not exist: {path}")]
    KeychainNotFound { path: PathBuf },

    #[error("Invalid principal id: {id}")]
    InvalidPrincipal { id: String },

    #[error("Key not found for principal: {principal}")]
    KeyNotFound { principal: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cipher operation failed: {reason}")]
    Cipher { reason: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
