//! [`XorCipher`]: a deterministic stand-in for real public-key crypto.
//!
//! A key pair "matches" when both files hold the same bytes; the
//! ciphertext is tagged with a key digest so decrypting with the wrong
//! key fails loudly instead of yielding garbage. This gives tests both
//! the happy path and a reproducible decryption failure. It is not
//! encryption and must never leave test code.

use filesync_keys::{AsymmetricCipher, Error, Result};

pub struct XorCipher;

fn key_tag(key: &[u8]) -> [u8; 4] {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(key);
    hasher.finalize().to_be_bytes()
}

fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .enumerate()
        .map(|(i, byte)| byte ^ key[i % key.len()])
        .collect()
}

impl AsymmetricCipher for XorCipher {
    fn encrypt(&self, plaintext: &[u8], public_key: &[u8]) -> Result<Vec<u8>> {
        let mut ciphertext = key_tag(public_key).to_vec();
        ciphertext.extend(xor(plaintext, public_key));
        Ok(ciphertext)
    }

    fn decrypt(&self, ciphertext: &[u8], private_key: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < 4 {
            return Err(Error::Cipher {
                reason: "ciphertext too short".to_string(),
            });
        }
        let (tag, body) = ciphertext.split_at(4);
        if tag != key_tag(private_key) {
            return Err(Error::Cipher {
                reason: "key does not match ciphertext".to_string(),
            });
        }
        Ok(xor(body, private_key))
    }
}
