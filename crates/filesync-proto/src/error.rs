//! Error types for filesync-proto

/// Result type for filesync-proto operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while marshaling protocol messages
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed JSON at the transport boundary
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
