//! On-disk keychain: one `<id>.publicKey` / `<id>.privateKey` pair per
//! principal under a single root directory. Key contents are opaque
//! bytes handed to the cipher; this module never parses them.

use std::fs;
use std::path::PathBuf;

use crate::principal::PrincipalId;
use crate::{Error, Result};

const PUBLIC_KEY_SUFFIX: &str = "publicKey";
const PRIVATE_KEY_SUFFIX: &str = "privateKey";

/// Read access to a keychain directory.
#[derive(Debug, Clone)]
pub struct Keychain {
    root: PathBuf,
}

impl Keychain {
    /// Open an existing keychain directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeychainNotFound`] if `root` is not a directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::KeychainNotFound { path: root });
        }
        Ok(Self { root })
    }

    pub fn has_public_key(&self, principal: &PrincipalId) -> bool {
        self.key_path(principal, PUBLIC_KEY_SUFFIX).is_file()
    }

    pub fn has_private_key(&self, principal: &PrincipalId) -> bool {
        self.key_path(principal, PRIVATE_KEY_SUFFIX).is_file()
    }

    /// Load a principal's public key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if no key file exists.
    pub fn load_public_key(&self, principal: &PrincipalId) -> Result<Vec<u8>> {
        self.load_key(principal, PUBLIC_KEY_SUFFIX)
    }

    /// Load a principal's private key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if no key file exists.
    pub fn load_private_key(&self, principal: &PrincipalId) -> Result<Vec<u8>> {
        self.load_key(principal, PRIVATE_KEY_SUFFIX)
    }

    fn load_key(&self, principal: &PrincipalId, suffix: &str) -> Result<Vec<u8>> {
        let path = self.key_path(principal, suffix);
        if !path.is_file() {
            return Err(Error::KeyNotFound {
                principal: principal.to_string(),
            });
        }
        fs::read(&path).map_err(|e| Error::io(&path, e))
    }

    fn key_path(&self, principal: &PrincipalId, suffix: &str) -> PathBuf {
        self.root.join(format!("{principal}.{suffix}"))
    }
}
