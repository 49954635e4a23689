//! Token storage backing the session lifecycle.
//!
//! A token is valid from insertion until a fixed TTL elapses; there is
//! no sliding renewal. Stores must be safe under concurrent access
//! from unrelated sessions, with each token an independent key.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Error, Result};

/// Create, check and delete session tokens.
///
/// `principal` records who a token was issued to. Validation never
/// depends on it; it exists so audit logs can name the acting
/// principal instead of a bare token.
pub trait SessionStore: Send + Sync {
    fn insert(&self, token: &str, principal: Option<&str>) -> Result<()>;

    /// Whether `token` exists and has not expired.
    fn validate(&self, token: &str) -> bool;

    /// Who a known token was issued to, expired or not.
    fn principal_of(&self, token: &str) -> Option<String>;

    /// Delete `token` unconditionally. Revoking an unknown token is
    /// not an error.
    fn revoke(&self, token: &str);
}

#[derive(Debug, Clone)]
struct Session {
    issued_at: SystemTime,
    principal: Option<String>,
}

/// In-process token store.
#[derive(Debug)]
pub struct MemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn insert(&self, token: &str, principal: Option<&str>) -> Result<()> {
        let mut sessions = self.sessions.write().map_err(|e| Error::Store {
            reason: e.to_string(),
        })?;
        sessions.insert(
            token.to_string(),
            Session {
                issued_at: SystemTime::now(),
                principal: principal.map(str::to_string),
            },
        );
        Ok(())
    }

    fn validate(&self, token: &str) -> bool {
        self.sessions
            .read()
            .ok()
            .and_then(|sessions| {
                sessions
                    .get(token)
                    .map(|session| match session.issued_at.elapsed() {
                        Ok(age) => age < self.ttl,
                        // Clock moved backwards; the token cannot have expired yet.
                        Err(_) => true,
                    })
            })
            .unwrap_or(false)
    }

    fn principal_of(&self, token: &str) -> Option<String> {
        self.sessions
            .read()
            .ok()
            .and_then(|sessions| sessions.get(token).and_then(|s| s.principal.clone()))
    }

    fn revoke(&self, token: &str) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(token);
        }
    }
}

/// Token store persisted as one file per token, so sessions survive a
/// restart and independent server processes can share state.
///
/// File names are derived from token values, which are hex by
/// construction; anything else is refused before touching the
/// filesystem.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: PathBuf,
    ttl: Duration,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::Store {
            reason: format!("cannot create session directory {}: {e}", dir.display()),
        })?;
        Ok(Self { dir, ttl })
    }

    fn token_path(&self, token: &str) -> PathBuf {
        self.dir.join(format!("{token}.tmp"))
    }
}

/// A token value may only contain hex digits. Everything else is
/// treated as unknown without ever forming a path from it.
fn is_safe_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_hexdigit())
}

impl SessionStore for FileSessionStore {
    fn insert(&self, token: &str, principal: Option<&str>) -> Result<()> {
        if !is_safe_token(token) {
            return Err(Error::Store {
                reason: "token is not hex".to_string(),
            });
        }
        let mut content = now_unix().to_string();
        if let Some(principal) = principal {
            content.push('\n');
            content.push_str(principal);
        }
        filesync_fs::io::write_atomic(&self.token_path(token), content.as_bytes())?;
        Ok(())
    }

    fn validate(&self, token: &str) -> bool {
        if !is_safe_token(token) {
            return false;
        }
        let content = match fs::read_to_string(self.token_path(token)) {
            Ok(content) => content,
            Err(_) => return false,
        };
        let issued_at: i64 = match content.lines().next().and_then(|l| l.parse().ok()) {
            Some(issued_at) => issued_at,
            None => return false,
        };
        now_unix() < issued_at + self.ttl.as_secs() as i64
    }

    fn principal_of(&self, token: &str) -> Option<String> {
        if !is_safe_token(token) {
            return None;
        }
        let content = fs::read_to_string(self.token_path(token)).ok()?;
        content.lines().nth(1).map(str::to_string)
    }

    fn revoke(&self, token: &str) {
        if !is_safe_token(token) {
            return;
        }
        let _ = fs::remove_file(self.token_path(token));
    }
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
