//! The seam between the client workflows and whatever performs HTTP.
//!
//! The browser implements [`Transport`] with `gloo-net`; tests use in-memory
//! fakes. Futures are not required to be `Send` because the client runs on a
//! single-threaded event loop.

use std::future::Future;

use crate::error::TransportError;
use crate::requests::HttpRequest;

/// Status and body of a completed HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    /// Host representation of a file attached to multipart requests.
    type File;

    /// Sends `request` once. Any HTTP status is a reply; only failures to get
    /// a response at all are errors.
    fn send(
        &self,
        request: HttpRequest<Self::File>,
    ) -> impl Future<Output = Result<HttpReply, TransportError>>;
}
