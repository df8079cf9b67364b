//! The request-adapter port.
//!
//! A request adapter turns a [`RequestInformation`] into a wire request,
//! dispatches it, and decodes the JSON response. The generated API client only
//! ever talks to this trait, so callers may substitute their own adapter (for
//! tests, proxies, or a different HTTP stack).

use async_trait::async_trait;
use serde_json::Value;

use crate::{RequestError, RequestInformation};

/// Serialises requests, dispatches them, and deserialises responses.
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    /// Base URL this adapter was configured with, if any.
    ///
    /// The generated client falls back to the public Asana endpoint when this
    /// returns `None`.
    fn base_url(&self) -> Option<&str> {
        None
    }

    /// Executes `request` and returns the decoded JSON body.
    ///
    /// Returns `Ok(None)` when the service answers with an empty body.
    async fn send(&self, request: RequestInformation) -> Result<Option<Value>, RequestError>;
}
