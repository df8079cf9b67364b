//! High-level Asana API client.
//!
//! Wraps the generated [`ApiClient`] with three things:
//!
//! - [`AsanaApiClient`]: builds an authenticated client from exactly one
//!   [`Credential`] (bearer token, custom authentication provider, or custom
//!   request adapter) and exposes the generated client unchanged.
//! - [`AsanaServiceCollectionExt`]: registers the client as a lazily-built
//!   singleton in a [`asana_abstractions::ServiceCollection`].
//! - Typed accessors on [`TasksPostRequestBodyData`] for task fields the
//!   upstream schema omits, stored in the model's additional-data map.
//!
//! ## Architectural Layer
//!
//! **Wrapper.** Construction and validation live here; HTTP details live in
//! `asana-http`, contracts in `asana-abstractions`.
//!
//! ## Example
//!
//! ```no_run
//! use asana_client::{AsanaApiClient, TasksPostRequestBody, TasksPostRequestBodyData};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AsanaApiClient::with_access_token("1/1234:abcd", reqwest::Client::new())?;
//!
//! let data = TasksPostRequestBodyData::default()
//!     .with_name("Write release notes")
//!     .with_due_on("2026-12-31")
//!     .with_completed(false);
//! let created = client
//!     .client()
//!     .tasks()
//!     .post(&TasksPostRequestBody::new(data))
//!     .await?;
//! # let _ = created;
//! # Ok(())
//! # }
//! ```

pub mod client;
mod extensions;
pub mod generated;
pub mod registration;

pub use client::{AsanaApiClient, AsanaApiClientBuilder, AsanaClient, Credential};
pub use generated::{
    ApiClient, TaskItemRequestBuilder, TasksPostRequestBody, TasksPostRequestBodyData,
    TasksRequestBuilder, DEFAULT_BASE_URL,
};
pub use registration::{AsanaClientRegistration, AsanaServiceCollectionExt, HTTP_CLIENT_NAME};
