//! Error types for filesync-server

/// Result type for filesync-server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in filesync-server operations.
///
/// `Unauthorized` and `NotFound` map one-to-one onto wire statuses;
/// their display strings never reach clients, only the uniform
/// envelope messages do.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request is not authorized")]
    Unauthorized,

    #[error("Requested path was refused")]
    NotFound,

    #[error("Session store failure: {reason}")]
    Store { reason: String },

    #[error(transparent)]
    Fs(#[from] filesync_fs::Error),

    #[error(transparent)]
    Keys(#[from] filesync_keys::Error),
}
