//! Challenge-response authorization.
//!
//! The challenge and the session token are the same value: a random
//! hex string persisted at issue time and returned encrypted under the
//! principal's public key. Proof of identity is the ability to decrypt
//! and echo that exact value back; no signature is ever checked, so
//! token length and randomness are what make guessing infeasible.

use std::sync::Arc;

use filesync_keys::{AsymmetricCipher, Keychain, PrincipalId};
use rand::RngCore;

use crate::session::SessionStore;
use crate::{Error, Result};

const TOKEN_BYTES: usize = 20;

/// Generate a random session token (hex-encoded).
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Issues and validates session tokens for one keychain.
pub struct AuthManager {
    keychain: Keychain,
    cipher: Arc<dyn AsymmetricCipher>,
    store: Arc<dyn SessionStore>,
}

impl AuthManager {
    pub fn new(
        keychain: Keychain,
        cipher: Arc<dyn AsymmetricCipher>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            keychain,
            cipher,
            store,
        }
    }

    /// Issue a token for `username` and return it encrypted under the
    /// principal's public key.
    ///
    /// # Errors
    ///
    /// Malformed usernames and unknown principals both return
    /// [`Error::Unauthorized`], indistinguishably, so the endpoint
    /// cannot be used to enumerate principals. Store and cipher
    /// faults propagate as themselves.
    pub fn authorize(&self, username: &str) -> Result<Vec<u8>> {
        let principal = match PrincipalId::new(username) {
            Ok(principal) => principal,
            Err(_) => {
                tracing::debug!(username, "authorize refused: malformed principal");
                return Err(Error::Unauthorized);
            }
        };
        let public_key = match self.keychain.load_public_key(&principal) {
            Ok(key) => key,
            Err(filesync_keys::Error::KeyNotFound { .. }) => {
                tracing::debug!(principal = %principal, "authorize refused: no public key");
                return Err(Error::Unauthorized);
            }
            Err(error) => return Err(error.into()),
        };

        let token = generate_token();
        self.store.insert(&token, Some(principal.as_str()))?;
        let ciphertext = self.cipher.encrypt(token.as_bytes(), &public_key)?;

        tracing::info!(principal = %principal, "issued session token");
        Ok(ciphertext)
    }

    pub fn is_authorized(&self, token: &str) -> bool {
        self.store.validate(token)
    }

    /// Principal a token was issued to, for audit logging.
    pub fn acting_principal(&self, token: &str) -> Option<String> {
        self.store.principal_of(token)
    }

    pub fn unauthorize(&self, token: &str) {
        self.store.revoke(token);
        tracing::info!("revoked session token");
    }
}
