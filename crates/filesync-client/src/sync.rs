//! Client-side sync orchestration.

use std::path::Path;
use std::sync::Arc;

use filesync_fs::scan;
use filesync_keys::{AsymmetricCipher, Keychain, PrincipalId};
use filesync_proto::{DiffResult, Request};

use crate::apply::{apply_entry, remove_entry};
use crate::transport::Transport;
use crate::{Error, Result};

/// Options for one sync run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Remove local files the server no longer has.
    pub delete: bool,
    /// Compare by content checksum instead of size and mtime.
    pub checksum: bool,
}

/// What a completed sync changed locally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
}

impl SyncReport {
    pub fn is_unchanged(&self) -> bool {
        self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// Pulls a server's directory tree into a local destination.
pub struct SyncClient<T: Transport> {
    transport: T,
    keychain: Keychain,
    cipher: Arc<dyn AsymmetricCipher>,
}

impl<T: Transport> SyncClient<T> {
    pub fn new(transport: T, keychain: Keychain, cipher: Arc<dyn AsymmetricCipher>) -> Self {
        Self {
            transport,
            keychain,
            cipher,
        }
    }

    /// Run a full sync of `directory` as `principal`.
    ///
    /// Fails fast, before any network traffic, when the principal is
    /// malformed or has no local private key. The first failing file
    /// aborts the run; there is no resume tracking. The session token
    /// is released best-effort either way.
    pub fn dispatch(
        &self,
        principal: &str,
        directory: &Path,
        options: SyncOptions,
    ) -> Result<SyncReport> {
        let principal = PrincipalId::new(principal)?;
        if !self.keychain.has_private_key(&principal) {
            return Err(Error::PrivateKeyMissing {
                principal: principal.to_string(),
            });
        }

        let token = self.authorize(&principal)?;
        let outcome = self.run_sync(&token, directory, options);

        if let Err(error) = self.transport.send(&Request::unauthorize(&token)) {
            tracing::warn!(%error, "failed to release session token");
        }

        outcome
    }

    fn run_sync(&self, token: &str, directory: &Path, options: SyncOptions) -> Result<SyncReport> {
        let manifest = scan(directory)?;
        let difference = self.fetch_difference(token, &manifest, options.checksum)?;
        tracing::info!(
            update = difference.update.len(),
            delete = difference.delete.len(),
            "received difference"
        );

        let mut report = SyncReport::default();
        for entry in &difference.update {
            let bytes = self.download(token, &entry.path)?;
            apply_entry(directory, entry, &bytes)?;
            tracing::info!(path = %entry.path, size = bytes.len(), "updated file");
            report.updated.push(entry.path.clone());
        }

        if options.delete {
            for path in &difference.delete {
                remove_entry(directory, path)?;
                tracing::info!(path = %path, "deleted file");
                report.deleted.push(path.clone());
            }
        }

        Ok(report)
    }

    /// Obtain a session token by decrypting the server's challenge.
    fn authorize(&self, principal: &PrincipalId) -> Result<String> {
        let response = self.transport.send(&Request::authorize(principal.as_str()))?;

        let challenge = response
            .is_success()
            .then(|| response.envelope())
            .flatten()
            .and_then(|envelope| envelope.data.as_ref())
            .and_then(|data| data.get("challenge"))
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::AuthenticationFailure {
                reason: "authorization refused".to_string(),
            })?;

        let ciphertext = hex::decode(&challenge).map_err(|_| Error::AuthenticationFailure {
            reason: "malformed challenge".to_string(),
        })?;
        let private_key = self.keychain.load_private_key(principal)?;
        let token = self
            .cipher
            .decrypt(&ciphertext, &private_key)
            .ok()
            .and_then(|plaintext| String::from_utf8(plaintext).ok())
            .ok_or_else(|| Error::AuthenticationFailure {
                reason: "decryption error".to_string(),
            })?;

        tracing::debug!(principal = %principal, "obtained session token");
        Ok(token)
    }

    fn fetch_difference(
        &self,
        token: &str,
        manifest: &filesync_proto::Manifest,
        checksum: bool,
    ) -> Result<DiffResult> {
        let files = manifest.entries().cloned().collect();
        let response = self
            .transport
            .send(&Request::difference(token, files, checksum))?;

        if !response.is_success() {
            return Err(Error::ProtocolFailure {
                reason: format!("difference returned status {}", response.status),
            });
        }
        let data = response
            .envelope()
            .and_then(|envelope| envelope.data.clone())
            .ok_or_else(|| Error::ProtocolFailure {
                reason: "difference response carries no data".to_string(),
            })?;
        serde_json::from_value(data).map_err(|_| Error::ProtocolFailure {
            reason: "malformed difference payload".to_string(),
        })
    }

    fn download(&self, token: &str, path: &str) -> Result<Vec<u8>> {
        let encoded = urlencoding::encode(path).into_owned();
        let response = self.transport.send(&Request::download(token, &encoded))?;

        if !response.is_success() {
            return Err(Error::ProtocolFailure {
                reason: format!("download of {path} returned status {}", response.status),
            });
        }
        response
            .bytes()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| Error::ProtocolFailure {
                reason: format!("download of {path} returned no bytes"),
            })
    }
}
