//! In-process transport wired straight into a [`Dispatcher`].
//!
//! Requests and JSON responses take a full serialize/parse round trip,
//! so tests exercise the real wire shapes without a socket.

use filesync_client::{Error, Transport};
use filesync_proto::{Envelope, Request, Response, ResponseBody};
use filesync_server::Dispatcher;

pub struct Loopback {
    dispatcher: Dispatcher,
}

impl Loopback {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

impl Transport for Loopback {
    fn send(&self, request: &Request) -> filesync_client::Result<Response> {
        let raw = request.to_json().map_err(|e| Error::Transport {
            reason: e.to_string(),
        })?;
        let response = self.dispatcher.handle_raw(&raw);

        match response.body {
            ResponseBody::Json(envelope) => {
                let json = envelope.to_json().map_err(|e| Error::Transport {
                    reason: e.to_string(),
                })?;
                let reparsed = Envelope::parse(&json).map_err(|e| Error::Transport {
                    reason: e.to_string(),
                })?;
                Ok(Response {
                    status: response.status,
                    body: ResponseBody::Json(reparsed),
                })
            }
            ResponseBody::Bytes(bytes) => Ok(Response {
                status: response.status,
                body: ResponseBody::Bytes(bytes),
            }),
        }
    }
}
