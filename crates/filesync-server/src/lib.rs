//! Server side of FileSync
//!
//! Hosts a directory tree behind the four protocol actions, enforcing
//! challenge-response authorization and the download security boundary.

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod guard;
pub mod session;

pub use auth::AuthManager;
pub use config::{DEFAULT_TOKEN_TTL, ServerConfig};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use guard::DownloadGuard;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
