//! [`SyncFixture`] builder for end-to-end sync scenarios.
//!
//! Lays out a temporary source tree, destination tree and keychain,
//! and wires servers and clients together over the loopback transport.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use filesync_client::SyncClient;
use filesync_fs::scan;
use filesync_keys::Keychain;
use filesync_proto::Manifest;
use filesync_server::{Dispatcher, MemorySessionStore, ServerConfig};
use tempfile::TempDir;

use crate::cipher::XorCipher;
use crate::loopback::Loopback;

/// A source/destination/keychain triple under one temporary directory.
///
/// # Example
///
/// ```rust,no_run
/// use filesync_test_utils::SyncFixture;
/// use filesync_client::SyncOptions;
///
/// let fixture = SyncFixture::new();
/// fixture.write_source("README.md", b"hello");
/// fixture.install_key_pair("alice");
/// let report = fixture
///     .client()
///     .dispatch("alice", &fixture.destination(), SyncOptions::default())
///     .unwrap();
/// assert_eq!(report.updated, vec!["README.md".to_string()]);
/// ```
pub struct SyncFixture {
    temp_dir: TempDir,
}

impl Default for SyncFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncFixture {
    /// Create `source/`, `destination/` and `keys/` under a fresh
    /// temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("SyncFixture: failed to create temp dir");
        for name in ["source", "destination", "keys"] {
            fs::create_dir(temp_dir.path().join(name))
                .expect("SyncFixture: failed to create subdirectory");
        }
        Self { temp_dir }
    }

    pub fn source(&self) -> PathBuf {
        self.temp_dir.path().join("source")
    }

    pub fn destination(&self) -> PathBuf {
        self.temp_dir.path().join("destination")
    }

    pub fn keys(&self) -> PathBuf {
        self.temp_dir.path().join("keys")
    }

    /// Write a file under the source tree, creating parents.
    pub fn write_source(&self, relative: &str, content: &[u8]) {
        write_under(&self.source(), relative, content);
    }

    /// Write a file under the destination tree, creating parents.
    pub fn write_destination(&self, relative: &str, content: &[u8]) {
        write_under(&self.destination(), relative, content);
    }

    /// Write the source tree's `.syncignore`.
    pub fn write_source_ignore(&self, rules: &str) {
        write_under(&self.source(), ".syncignore", rules.as_bytes());
    }

    /// Install a matching key pair: under [`XorCipher`], a pair
    /// matches when both files hold identical bytes.
    pub fn install_key_pair(&self, principal: &str) {
        let secret = format!("{principal}-shared-secret");
        self.write_key(principal, "publicKey", secret.as_bytes());
        self.write_key(principal, "privateKey", secret.as_bytes());
    }

    /// Install a broken key pair whose decryption always fails.
    pub fn install_mismatched_key_pair(&self, principal: &str) {
        self.write_key(principal, "publicKey", b"one-half");
        self.write_key(principal, "privateKey", b"other-half");
    }

    fn write_key(&self, principal: &str, suffix: &str, content: &[u8]) {
        fs::write(self.keys().join(format!("{principal}.{suffix}")), content)
            .expect("SyncFixture: failed to write key file");
    }

    /// A dispatcher serving the source tree with the default TTL.
    pub fn server(&self) -> Dispatcher {
        self.server_with_ttl(filesync_server::DEFAULT_TOKEN_TTL)
    }

    pub fn server_with_ttl(&self, ttl: Duration) -> Dispatcher {
        let config = ServerConfig::new(self.source(), self.keys()).with_token_ttl(ttl);
        Dispatcher::new(
            config,
            Arc::new(XorCipher),
            Arc::new(MemorySessionStore::new(ttl)),
        )
        .expect("SyncFixture: failed to build dispatcher")
    }

    /// A sync client talking to [`Self::server`] over loopback.
    pub fn client(&self) -> SyncClient<Loopback> {
        self.client_for(self.server())
    }

    /// A sync client talking to a specific dispatcher, for scenarios
    /// that need to share one token store across calls.
    pub fn client_for(&self, dispatcher: Dispatcher) -> SyncClient<Loopback> {
        SyncClient::new(
            Loopback::new(dispatcher),
            Keychain::new(self.keys()).expect("SyncFixture: keychain missing"),
            Arc::new(XorCipher),
        )
    }

    /// Scan the source tree as the server lists it for a difference call.
    pub fn source_manifest(&self) -> Manifest {
        scan(&self.source()).expect("SyncFixture: failed to scan source tree")
    }

    /// Scan the destination tree; after a full sync into a fresh
    /// destination this matches [`Self::source_manifest`].
    pub fn destination_manifest(&self) -> Manifest {
        scan(&self.destination()).expect("SyncFixture: failed to scan destination tree")
    }

    pub fn read_destination(&self, relative: &str) -> Vec<u8> {
        let path = join_relative(&self.destination(), relative);
        fs::read(&path)
            .unwrap_or_else(|_| panic!("Could not read destination file: {}", path.display()))
    }

    /// Assert that `relative` exists in the destination tree.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_destination_exists(&self, relative: &str) {
        let path = join_relative(&self.destination(), relative);
        assert!(
            path.exists(),
            "Expected destination file to exist: {}",
            path.display()
        );
    }

    /// Assert that `relative` does **not** exist in the destination tree.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_destination_not_exists(&self, relative: &str) {
        let path = join_relative(&self.destination(), relative);
        assert!(
            !path.exists(),
            "Expected destination file NOT to exist: {}",
            path.display()
        );
    }
}

fn write_under(root: &Path, relative: &str, content: &[u8]) {
    let path = join_relative(root, relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("SyncFixture: failed to create parent directory");
    }
    fs::write(&path, content)
        .unwrap_or_else(|_| panic!("Could not write fixture file: {}", path.display()));
}

fn join_relative(root: &Path, relative: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for component in relative.split('/') {
        path.push(component);
    }
    path
}
