//! The asymmetric cipher seam.
//!
//! Key material and ciphertext are opaque to the protocol core; the
//! actual public-key primitives live behind this trait so deployments
//! choose their own implementation.

use crate::Result;

/// Public-key encryption as the protocol consumes it.
///
/// `encrypt(plaintext, public_key)` on the server must be reversible by
/// `decrypt(ciphertext, private_key)` on the client for a matching key
/// pair. Implementations map their failures to [`crate::Error::Cipher`].
pub trait AsymmetricCipher: Send + Sync {
    fn encrypt(&self, plaintext: &[u8], public_key: &[u8]) -> Result<Vec<u8>>;

    fn decrypt(&self, ciphertext: &[u8], private_key: &[u8]) -> Result<Vec<u8>>;
}
