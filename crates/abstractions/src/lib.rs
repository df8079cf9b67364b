//! Core abstractions for the Asana client toolkit.
//!
//! This crate defines the request model, the adapter and authentication ports,
//! the additional-data helpers used by extensible request bodies, and the small
//! dependency container the client registers itself into. Infrastructure
//! crates implement the traits defined here; they never add new contracts.
//!
//! ## Architectural Layer
//!
//! **Ports + shared types.** This crate has no I/O dependencies. It defines
//! *what* a request adapter or authentication provider must do; `asana-http`
//! defines *how* over `reqwest`.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`errors`] | `ClientError`, `RequestError`, `ServiceError` |
//! | [`identifiers`] | `AccessToken`, `TaskGid`, `WorkspaceGid` |
//! | [`request`] | `HttpMethod`, `RequestInformation` |
//! | [`adapter`] | The `RequestAdapter` port |
//! | [`auth`] | Authentication ports and the bearer-token chain |
//! | [`additional_data`] | Typed views over untyped additional-data maps |
//! | [`container`] | `ServiceCollection` / `ServiceProvider` lazy singletons |

pub mod adapter;
pub mod additional_data;
pub mod auth;
pub mod container;
pub mod errors;
pub mod identifiers;
pub mod request;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use adapter::RequestAdapter;
pub use additional_data::{AdditionalData, AdditionalDataHolder};
pub use auth::{
    AccessTokenProvider, AllowedHostsValidator, AnonymousAuthenticationProvider,
    AuthenticationProvider, BaseBearerTokenAuthenticationProvider, StaticTokenProvider,
};
pub use container::{ServiceCollection, ServiceProvider};
pub use errors::{BoxError, ClientError, RequestError, ServiceError};
pub use identifiers::{AccessToken, TaskGid, WorkspaceGid};
pub use request::{HttpMethod, RequestInformation};
