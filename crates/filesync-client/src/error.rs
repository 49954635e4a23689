//! Error types for filesync-client

use std::path::PathBuf;

/// Result type for filesync-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in filesync-client operations.
///
/// All are terminal for the current sync: the orchestrator surfaces
/// the first failure and stops, with no internal retry or resume.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No private key for principal: {principal}")]
    PrivateKeyMissing { principal: String },

    #[error("Authentication failure: {reason}")]
    AuthenticationFailure { reason: String },

    #[error("Protocol failure: {reason}")]
    ProtocolFailure { reason: String },

    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fs(#[from] filesync_fs::Error),

    #[error(transparent)]
    Keys(#[from] filesync_keys::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
