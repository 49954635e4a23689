//! Principal identifiers.
//!
//! A principal id names a key pair in a keychain and doubles as the
//! `username` of an authorize request. The allowed alphabet excludes
//! path separators, so an id can never address files outside the
//! keychain root.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static PRINCIPAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.+@-]+$").expect("Invalid principal pattern"));

/// A validated principal id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Validate an id against the allowed alphabet: letters, digits,
    /// `_`, `.`, `+`, `@` and `-`.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if PRINCIPAL_PATTERN.is_match(&id) {
            Ok(Self(id))
        } else {
            Err(Error::InvalidPrincipal { id })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
