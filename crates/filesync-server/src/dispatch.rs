//! Server-side action dispatch.
//!
//! One request in, one response out; the dispatcher holds no per-call
//! state, so a single instance serves unrelated sessions concurrently.
//! Every failure surfaces as a uniform envelope whose message reveals
//! nothing beyond its status code.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use filesync_fs::scan;
use filesync_keys::{AsymmetricCipher, Keychain};
use filesync_proto::wire::action;
use filesync_proto::{CompareMode, Manifest, Request, Response, diff};
use serde_json::json;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::guard::DownloadGuard;
use crate::session::SessionStore;
use crate::{Error, Result};

/// Routes protocol requests against one served directory.
pub struct Dispatcher {
    root: PathBuf,
    auth: AuthManager,
    guard: DownloadGuard,
}

impl Dispatcher {
    /// # Errors
    ///
    /// Fails if the configured keychain root does not exist.
    pub fn new(
        config: ServerConfig,
        cipher: Arc<dyn AsymmetricCipher>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        let keychain = Keychain::new(&config.keychain_root)?;
        Ok(Self {
            guard: DownloadGuard::new(&config.root),
            auth: AuthManager::new(keychain, cipher, store),
            root: config.root,
        })
    }

    /// Handle a raw request body straight off the transport.
    ///
    /// Malformed JSON is indistinguishable from a request with no
    /// recognized action.
    pub fn handle_raw(&self, raw: &str) -> Response {
        match Request::parse(raw) {
            Ok(request) => self.handle(&request),
            Err(error) => {
                tracing::debug!(%error, "rejected unparseable request");
                Response::unauthorized()
            }
        }
    }

    /// Handle a parsed request.
    pub fn handle(&self, request: &Request) -> Response {
        match request.action.as_str() {
            action::AUTHORIZE => self.handle_authorize(request),
            action::UNAUTHORIZE | action::DIFFERENCE | action::DOWNLOAD => {
                let token = request.token.as_deref().unwrap_or_default();
                if !self.auth.is_authorized(token) {
                    tracing::debug!(action = %request.action, "rejected request without valid token");
                    return Response::unauthorized();
                }
                if let Some(principal) = self.auth.acting_principal(token) {
                    tracing::debug!(action = %request.action, principal, "dispatching");
                }
                match request.action.as_str() {
                    action::UNAUTHORIZE => self.handle_unauthorize(token),
                    action::DIFFERENCE => self.handle_difference(request),
                    _ => self.handle_download(request),
                }
            }
            other => {
                tracing::debug!(action = other, "rejected unrecognized action");
                Response::unauthorized()
            }
        }
    }

    fn handle_authorize(&self, request: &Request) -> Response {
        let username = match request.username.as_deref() {
            Some(username) => username,
            None => return Response::unauthorized(),
        };
        match self.auth.authorize(username) {
            Ok(ciphertext) => Response::ok(json!({ "challenge": hex::encode(ciphertext) })),
            Err(Error::Unauthorized) => Response::unauthorized(),
            Err(error) => {
                tracing::error!(%error, "authorize failed");
                Response::internal_error()
            }
        }
    }

    fn handle_unauthorize(&self, token: &str) -> Response {
        self.auth.unauthorize(token);
        Response::ok(json!([]))
    }

    fn handle_difference(&self, request: &Request) -> Response {
        let (files, checksum) = match (&request.files, request.checksum) {
            (Some(files), Some(checksum)) => (files.clone(), checksum),
            _ => return Response::bad_request(),
        };

        let source = match scan(&self.root) {
            Ok(manifest) => manifest,
            Err(error) => {
                tracing::error!(%error, "failed to scan serving root");
                return Response::internal_error();
            }
        };
        let destination = Manifest::from(files);
        let result = diff(
            &source,
            &destination,
            CompareMode::from_checksum_flag(checksum),
        );

        tracing::debug!(
            update = result.update.len(),
            delete = result.delete.len(),
            "computed difference"
        );
        match serde_json::to_value(&result) {
            Ok(value) => Response::ok(value),
            Err(error) => {
                tracing::error!(%error, "failed to serialize difference");
                Response::internal_error()
            }
        }
    }

    fn handle_download(&self, request: &Request) -> Response {
        let encoded = match request.file.as_deref() {
            Some(file) => file,
            None => return Response::bad_request(),
        };
        let requested = match urlencoding::decode(encoded) {
            Ok(requested) => requested.into_owned(),
            Err(_) => {
                tracing::warn!("download refused: undecodable file parameter");
                return Response::not_found();
            }
        };

        let path = match self.guard.resolve(&requested) {
            Ok(path) => path,
            Err(_) => return Response::not_found(),
        };
        match fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!(file = %requested, size = bytes.len(), "serving file");
                Response::file(bytes)
            }
            Err(error) => {
                tracing::warn!(file = %requested, %error, "download refused: unreadable file");
                Response::not_found()
            }
        }
    }
}
