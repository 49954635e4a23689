//! Server configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default validity window for issued tokens.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Configuration for a dispatching server.
///
/// The TTL is fixed and uniform: every token issued by this server
/// expires the same interval after issue, with no sliding renewal and
/// no per-principal override.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory tree served to clients
    pub root: PathBuf,
    /// Directory holding `<principal>.publicKey` files
    pub keychain_root: PathBuf,
    /// How long an issued token stays valid
    pub token_ttl: Duration,
}

impl ServerConfig {
    pub fn new(root: impl Into<PathBuf>, keychain_root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            keychain_root: keychain_root.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}
