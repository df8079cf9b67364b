//! Asana client HTTP infrastructure.
//!
//! Implements the [`asana_abstractions::RequestAdapter`] port over `reqwest`
//! and provides [`HttpClientFactory`], the single source of pooled transports
//! for the workspace.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL assembly, header mapping, body encoding, status
//! handling and JSON decoding all live here. The generated client sees only
//! [`asana_abstractions::RequestAdapter`].

pub mod adapter;
pub mod factory;

pub use adapter::HttpClientRequestAdapter;
pub use factory::{HttpClientFactory, HttpClientOptions};

/// Maps a `reqwest` failure onto the transport-neutral error type.
pub(crate) fn transport_error(err: reqwest::Error) -> asana_abstractions::RequestError {
    asana_abstractions::RequestError::Transport(err.to_string())
}
