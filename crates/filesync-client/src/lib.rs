//! Client side of FileSync
//!
//! Orchestrates a pull sync: authorize, exchange manifests, download
//! changed files and apply them locally with matching metadata.

pub mod apply;
pub mod error;
pub mod sync;
pub mod transport;

pub use error::{Error, Result};
pub use sync::{SyncClient, SyncOptions, SyncReport};
pub use transport::Transport;
