//! Generated API surface.
//!
//! This module mirrors the shape of code produced from the Asana OpenAPI
//! description: a root [`ApiClient`], request builders per path, and request
//! models. It is kept to the routes this crate drives. Hand-written additions
//! to generated types live in `crate::extensions`, never here.

mod api_client;
mod tasks;

pub use api_client::{ApiClient, DEFAULT_BASE_URL};
pub use tasks::{
    TaskItemRequestBuilder, TasksPostRequestBody, TasksPostRequestBodyData, TasksRequestBuilder,
};
