//! Key management for FileSync
//!
//! Provides principal identifiers, the on-disk keychain layout and the
//! cipher trait separating the protocol from cryptographic primitives.

pub mod cipher;
pub mod error;
pub mod keychain;
pub mod principal;

pub use cipher::AsymmetricCipher;
pub use error::{Error, Result};
pub use keychain::Keychain;
pub use principal::PrincipalId;
