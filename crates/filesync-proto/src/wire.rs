//! Request and response envelopes for the sync protocol.
//!
//! Every exchange is a single JSON request answered by either a JSON
//! envelope (`{"data": ...}` on success, `{"error": {...}}` on failure)
//! or, for downloads, the raw file bytes. Error messages are uniform
//! per status code so responses leak nothing about server internals.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entry::FileEntry;
use crate::error::Result;

/// Protocol action names.
pub mod action {
    pub const AUTHORIZE: &str = "authorize";
    pub const UNAUTHORIZE: &str = "unauthorize";
    pub const DIFFERENCE: &str = "difference";
    pub const DOWNLOAD: &str = "download";
}

/// Response status codes, mirroring their HTTP namesakes.
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL: u16 = 500;
}

/// A client request. One flat shape covers all four actions; fields
/// irrelevant to an action are absent from the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Request {
    /// Parse a request from its JSON wire form.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn authorize(username: &str) -> Self {
        Self {
            action: action::AUTHORIZE.to_string(),
            username: Some(username.to_string()),
            ..Self::default()
        }
    }

    pub fn unauthorize(token: &str) -> Self {
        Self {
            action: action::UNAUTHORIZE.to_string(),
            token: Some(token.to_string()),
            ..Self::default()
        }
    }

    pub fn difference(token: &str, files: Vec<FileEntry>, checksum: bool) -> Self {
        Self {
            action: action::DIFFERENCE.to_string(),
            token: Some(token.to_string()),
            files: Some(files),
            checksum: Some(checksum),
            ..Self::default()
        }
    }

    /// `file` is expected to be URL-encoded by the caller.
    pub fn download(token: &str, file: &str) -> Self {
        Self {
            action: action::DOWNLOAD.to_string(),
            token: Some(token.to_string()),
            file: Some(file.to_string()),
            ..Self::default()
        }
    }
}

/// JSON body of a non-download response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
}

impl Envelope {
    pub fn data(value: Value) -> Self {
        Self {
            data: Some(value),
            error: None,
        }
    }

    pub fn failure(message: &str, code: u16) -> Self {
        Self {
            data: None,
            error: Some(ErrorBody {
                message: message.to_string(),
                code,
            }),
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A complete server response: a status code plus either a JSON
/// envelope or raw file bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Envelope),
    Bytes(Vec<u8>),
}

impl Response {
    pub fn ok(value: Value) -> Self {
        Self {
            status: status::OK,
            body: ResponseBody::Json(Envelope::data(value)),
        }
    }

    pub fn file(bytes: Vec<u8>) -> Self {
        Self {
            status: status::OK,
            body: ResponseBody::Bytes(bytes),
        }
    }

    pub fn failure(message: &str, code: u16) -> Self {
        Self {
            status: code,
            body: ResponseBody::Json(Envelope::failure(message, code)),
        }
    }

    pub fn unauthorized() -> Self {
        Self::failure("Unauthorized", status::UNAUTHORIZED)
    }

    pub fn bad_request() -> Self {
        Self::failure("Bad Request", status::BAD_REQUEST)
    }

    pub fn not_found() -> Self {
        Self::failure("Not Found", status::NOT_FOUND)
    }

    pub fn internal_error() -> Self {
        Self::failure("Internal Server Error", status::INTERNAL)
    }

    pub fn is_success(&self) -> bool {
        self.status == status::OK
    }

    pub fn envelope(&self) -> Option<&Envelope> {
        match &self.body {
            ResponseBody::Json(envelope) => Some(envelope),
            ResponseBody::Bytes(_) => None,
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.body {
            ResponseBody::Bytes(bytes) => Some(bytes),
            ResponseBody::Json(_) => None,
        }
    }
}
