//! The wire seam.
//!
//! The orchestrator talks to a server through this trait; HTTP, a unix
//! socket or an in-process loopback are all equally valid carriers as
//! long as one request yields one response.

use filesync_proto::{Request, Response};

use crate::Result;

/// One request/response round trip to a sync server.
pub trait Transport: Send + Sync {
    /// Deliver `request` and return the server's response.
    ///
    /// Implementations map carrier-level failures (connection refused,
    /// timeouts) to [`crate::Error::Transport`]; protocol-level errors
    /// come back as ordinary [`Response`] values.
    fn send(&self, request: &Request) -> Result<Response>;
}
