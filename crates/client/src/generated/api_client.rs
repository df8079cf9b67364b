use std::sync::Arc;

use asana_abstractions::RequestAdapter;

use super::TasksRequestBuilder;

/// Public Asana REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://app.asana.com/api/1.0";

/// Root of the generated request-builder tree.
#[derive(Clone)]
pub struct ApiClient {
    request_adapter: Arc<dyn RequestAdapter>,
    base_url: String,
}

impl ApiClient {
    /// Creates a client over `request_adapter`, using the adapter's base URL
    /// or [`DEFAULT_BASE_URL`].
    pub fn new(request_adapter: Arc<dyn RequestAdapter>) -> Self {
        let base_url = request_adapter
            .base_url()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        Self {
            request_adapter,
            base_url,
        }
    }

    /// Creates a client with an explicit base URL.
    pub fn with_base_url(request_adapter: Arc<dyn RequestAdapter>, base_url: &str) -> Self {
        Self {
            request_adapter,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL every request builder starts from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The adapter requests are sent through.
    pub fn request_adapter(&self) -> &Arc<dyn RequestAdapter> {
        &self.request_adapter
    }

    /// Builds requests against `/tasks`.
    pub fn tasks(&self) -> TasksRequestBuilder {
        TasksRequestBuilder::new(
            Arc::clone(&self.request_adapter),
            format!("{}/tasks", self.base_url),
        )
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
