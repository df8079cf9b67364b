//! Client handle construction.
//!
//! [`AsanaApiClient`] is built from exactly one [`Credential`]:
//!
//! | Credential | Chain built |
//! |------------|-------------|
//! | `AccessToken` | `StaticTokenProvider` → `BaseBearerTokenAuthenticationProvider` → `HttpClientRequestAdapter` → `ApiClient` |
//! | `AuthenticationProvider` | caller's provider → `HttpClientRequestAdapter` → `ApiClient` |
//! | `RequestAdapter` | caller's adapter → `ApiClient` |
//!
//! Validation happens before anything is built, in this order: a credential
//! was supplied, the token text is not blank, a transport was supplied when
//! the credential needs one.

use std::sync::Arc;

use asana_abstractions::{
    AccessToken, AuthenticationProvider, BaseBearerTokenAuthenticationProvider, ClientError,
    RequestAdapter,
};
use asana_http::HttpClientRequestAdapter;
use tracing::debug;

use crate::generated::ApiClient;

/// Wrapper interface for code that only needs the generated client.
pub trait AsanaClient: Send + Sync {
    /// The generated API client. Repeated calls return the same instance.
    fn client(&self) -> &Arc<ApiClient>;
}

/// The one credential a client is built from.
#[derive(Clone)]
pub enum Credential {
    /// Raw bearer token text, validated at build time.
    AccessToken(String),
    /// Caller-supplied authenticator; requests still go through the transport.
    AuthenticationProvider(Arc<dyn AuthenticationProvider>),
    /// Caller-supplied adapter; no transport or authenticator is built.
    RequestAdapter(Arc<dyn RequestAdapter>),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Self::AuthenticationProvider(_) => f.write_str("AuthenticationProvider(..)"),
            Self::RequestAdapter(_) => f.write_str("RequestAdapter(..)"),
        }
    }
}

/// Authenticated Asana client handle.
///
/// Immutable once built; cloning shares the underlying [`ApiClient`].
#[derive(Debug, Clone)]
pub struct AsanaApiClient {
    client: Arc<ApiClient>,
}

impl AsanaApiClient {
    /// Builds a client that sends `Authorization: Bearer <access_token>`
    /// through `transport`.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidArgument`] naming `access_token` if the token is
    /// empty or whitespace-only.
    pub fn with_access_token(
        access_token: impl Into<String>,
        transport: reqwest::Client,
    ) -> Result<Self, ClientError> {
        Self::builder()
            .access_token(access_token)
            .transport(transport)
            .build()
    }

    /// Builds a client from an already-validated token.
    pub fn from_access_token(access_token: AccessToken, transport: reqwest::Client) -> Self {
        let authentication_provider: Arc<dyn AuthenticationProvider> =
            Arc::new(BaseBearerTokenAuthenticationProvider::from_token(access_token));
        Self::with_authentication_provider(authentication_provider, transport)
    }

    /// Builds a client that authenticates with `authentication_provider`.
    pub fn with_authentication_provider(
        authentication_provider: Arc<dyn AuthenticationProvider>,
        transport: reqwest::Client,
    ) -> Self {
        let adapter = HttpClientRequestAdapter::new(authentication_provider, transport);
        Self::with_request_adapter(Arc::new(adapter))
    }

    /// Builds a client that sends every request through `request_adapter`.
    pub fn with_request_adapter(request_adapter: Arc<dyn RequestAdapter>) -> Self {
        Self::from_api_client(ApiClient::new(request_adapter))
    }

    /// Starts a builder; use it when the inputs are only known at runtime.
    pub fn builder() -> AsanaApiClientBuilder {
        AsanaApiClientBuilder::default()
    }

    /// The generated API client. Repeated calls return the same instance.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    fn from_api_client(client: ApiClient) -> Self {
        debug!(base_url = client.base_url(), "Created Asana API client");
        Self {
            client: Arc::new(client),
        }
    }
}

impl AsanaClient for AsanaApiClient {
    fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }
}

/// Collects construction inputs and validates them together.
///
/// Setting a second credential replaces the first.
#[derive(Debug, Default, Clone)]
pub struct AsanaApiClientBuilder {
    credential: Option<Credential>,
    transport: Option<reqwest::Client>,
    base_url: Option<String>,
}

impl AsanaApiClientBuilder {
    /// Sets the credential.
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Uses a bearer token.
    #[must_use]
    pub fn access_token(self, access_token: impl Into<String>) -> Self {
        self.credential(Credential::AccessToken(access_token.into()))
    }

    /// Uses a custom authenticator.
    #[must_use]
    pub fn authentication_provider(self, provider: Arc<dyn AuthenticationProvider>) -> Self {
        self.credential(Credential::AuthenticationProvider(provider))
    }

    /// Uses a custom request adapter.
    #[must_use]
    pub fn request_adapter(self, adapter: Arc<dyn RequestAdapter>) -> Self {
        self.credential(Credential::RequestAdapter(adapter))
    }

    /// Sets the HTTP transport. Ignored for [`Credential::RequestAdapter`].
    #[must_use]
    pub fn transport(mut self, transport: reqwest::Client) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Overrides the service base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Validates the inputs and builds the client.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingDependency`] naming `credential` if none was set.
    /// - [`ClientError::InvalidArgument`] naming `access_token` for a blank token.
    /// - [`ClientError::MissingDependency`] naming `transport` if the
    ///   credential needs a transport and none was set.
    pub fn build(self) -> Result<AsanaApiClient, ClientError> {
        let credential = self
            .credential
            .ok_or_else(|| ClientError::missing_dependency("credential"))?;

        let request_adapter: Arc<dyn RequestAdapter> = match credential {
            Credential::RequestAdapter(adapter) => adapter,
            Credential::AccessToken(raw) => {
                let token = AccessToken::new(raw)?;
                let transport = self
                    .transport
                    .ok_or_else(|| ClientError::missing_dependency("transport"))?;
                let provider: Arc<dyn AuthenticationProvider> =
                    Arc::new(BaseBearerTokenAuthenticationProvider::from_token(token));
                Arc::new(HttpClientRequestAdapter::new(provider, transport))
            }
            Credential::AuthenticationProvider(provider) => {
                let transport = self
                    .transport
                    .ok_or_else(|| ClientError::missing_dependency("transport"))?;
                Arc::new(HttpClientRequestAdapter::new(provider, transport))
            }
        };

        let client = match self.base_url.as_deref() {
            Some(base_url) => ApiClient::with_base_url(request_adapter, base_url),
            None => ApiClient::new(request_adapter),
        };
        Ok(AsanaApiClient::from_api_client(client))
    }
}
