//! `reqwest`-backed request adapter.

use std::sync::Arc;

use asana_abstractions::{
    AuthenticationProvider, HttpMethod, RequestAdapter, RequestError, RequestInformation,
};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::transport_error;

/// Executes [`RequestInformation`]s with a shared `reqwest::Client`.
///
/// Every request passes through the configured [`AuthenticationProvider`]
/// before dispatch. The client is expected to come from
/// [`crate::HttpClientFactory`] so connection pools are shared.
#[derive(Clone)]
pub struct HttpClientRequestAdapter {
    client: reqwest::Client,
    authentication_provider: Arc<dyn AuthenticationProvider>,
    base_url: Option<String>,
}

impl HttpClientRequestAdapter {
    /// Creates an adapter that authenticates with `authentication_provider`
    /// and sends through `client`.
    pub fn new(
        authentication_provider: Arc<dyn AuthenticationProvider>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            authentication_provider,
            base_url: None,
        }
    }

    /// Overrides the service base URL (e.g. for a proxy or a test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = Some(base_url.trim_end_matches('/').to_owned());
        self
    }

}

impl std::fmt::Debug for HttpClientRequestAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClientRequestAdapter")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RequestAdapter for HttpClientRequestAdapter {
    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    async fn send(&self, mut request: RequestInformation) -> Result<Option<Value>, RequestError> {
        self.authentication_provider
            .authenticate_request(&mut request)
            .await?;

        let url = request.parsed_url()?;
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(content) = &request.content {
            builder = builder.json(content);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "Response received");

        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| RequestError::Deserialization(e.to_string()))
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}
