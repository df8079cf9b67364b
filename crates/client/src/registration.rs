//! Container registration for [`AsanaApiClient`].
//!
//! Every registration adds:
//!
//! - an [`HttpClientFactory`] singleton, unless one is already registered;
//! - an [`AsanaApiClient`] singleton built on first resolution from the
//!   pooled transport named [`HTTP_CLIENT_NAME`];
//! - optionally, an [`ApiClient`] singleton that resolves to the very
//!   `Arc<ApiClient>` held by the `AsanaApiClient` singleton.
//!
//! Literal tokens are validated when registering. Factories run at most once
//! per provider, on first resolution.

use std::sync::Arc;

use asana_abstractions::{
    AccessToken, AuthenticationProvider, BoxError, ClientError, ServiceCollection,
    ServiceProvider,
};
use asana_http::{HttpClientFactory, HttpClientOptions};
use tracing::debug;

use crate::client::{AsanaApiClient, Credential};
use crate::generated::ApiClient;

/// Logical name of the transport handed to the client.
pub const HTTP_CLIENT_NAME: &str = "AsanaApiClient";

type TokenFactory = Arc<dyn Fn(&ServiceProvider) -> String + Send + Sync>;
type AuthenticationProviderFactory =
    Arc<dyn Fn(&ServiceProvider) -> Arc<dyn AuthenticationProvider> + Send + Sync>;

#[derive(Clone)]
enum CredentialSource {
    Token(AccessToken),
    RawToken(String),
    TokenFactory(TokenFactory),
    AuthenticationProviderFactory(AuthenticationProviderFactory),
}

/// Describes how the container should build the client.
///
/// A registration without any credential source is rejected by
/// [`AsanaServiceCollectionExt::add_asana_client_with`].
#[derive(Clone, Default)]
pub struct AsanaClientRegistration {
    source: Option<CredentialSource>,
    http_options: HttpClientOptions,
    base_url: Option<String>,
    register_api_client: bool,
}

impl AsanaClientRegistration {
    /// Creates an empty registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a literal bearer token.
    #[must_use]
    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.source = Some(CredentialSource::RawToken(access_token.into()));
        self
    }

    /// Produces the token from the provider on first resolution.
    #[must_use]
    pub fn token_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&ServiceProvider) -> String + Send + Sync + 'static,
    {
        self.source = Some(CredentialSource::TokenFactory(Arc::new(factory)));
        self
    }

    /// Produces the authenticator from the provider on first resolution.
    #[must_use]
    pub fn authentication_provider_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&ServiceProvider) -> Arc<dyn AuthenticationProvider> + Send + Sync + 'static,
    {
        self.source = Some(CredentialSource::AuthenticationProviderFactory(Arc::new(
            factory,
        )));
        self
    }

    /// Options for the [`HttpClientFactory`] registered alongside the client.
    /// Ignored if a factory is already registered.
    #[must_use]
    pub fn http_options(mut self, options: HttpClientOptions) -> Self {
        self.http_options = options;
        self
    }

    /// Overrides the service base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Also registers the generated [`ApiClient`] as its own singleton.
    #[must_use]
    pub fn with_api_client(mut self) -> Self {
        self.register_api_client = true;
        self
    }
}

impl std::fmt::Debug for AsanaClientRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            None => "none",
            Some(CredentialSource::Token(_) | CredentialSource::RawToken(_)) => "access_token",
            Some(CredentialSource::TokenFactory(_)) => "token_factory",
            Some(CredentialSource::AuthenticationProviderFactory(_)) => {
                "authentication_provider_factory"
            }
        };
        f.debug_struct("AsanaClientRegistration")
            .field("source", &source)
            .field("http_options", &self.http_options)
            .field("base_url", &self.base_url)
            .field("register_api_client", &self.register_api_client)
            .finish()
    }
}

/// Registration helpers on [`ServiceCollection`].
pub trait AsanaServiceCollectionExt {
    /// Registers a client authenticated with a literal token.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidArgument`] naming `access_token` for a blank token.
    fn add_asana_client(&mut self, access_token: impl Into<String>)
        -> Result<&mut Self, ClientError>;

    /// Registers a client whose token is computed on first resolution.
    fn add_asana_client_with_token_factory<F>(&mut self, factory: F) -> Result<&mut Self, ClientError>
    where
        F: Fn(&ServiceProvider) -> String + Send + Sync + 'static;

    /// Registers a client whose authenticator is built on first resolution.
    fn add_asana_client_with_authentication_provider_factory<F>(
        &mut self,
        factory: F,
    ) -> Result<&mut Self, ClientError>
    where
        F: Fn(&ServiceProvider) -> Arc<dyn AuthenticationProvider> + Send + Sync + 'static;

    /// Registers a client as described by `registration`.
    ///
    /// # Errors
    ///
    /// [`ClientError::MissingDependency`] naming `factory` if the registration
    /// has no credential source; [`ClientError::InvalidArgument`] naming
    /// `access_token` for a blank literal token.
    fn add_asana_client_with(
        &mut self,
        registration: AsanaClientRegistration,
    ) -> Result<&mut Self, ClientError>;

    /// Like [`Self::add_asana_client`], also registering [`ApiClient`].
    fn add_asana_client_with_api_client(
        &mut self,
        access_token: impl Into<String>,
    ) -> Result<&mut Self, ClientError>;

    /// Like [`Self::add_asana_client_with_token_factory`], also registering
    /// [`ApiClient`].
    fn add_asana_client_with_api_client_and_token_factory<F>(
        &mut self,
        factory: F,
    ) -> Result<&mut Self, ClientError>
    where
        F: Fn(&ServiceProvider) -> String + Send + Sync + 'static;
}

impl AsanaServiceCollectionExt for ServiceCollection {
    fn add_asana_client(
        &mut self,
        access_token: impl Into<String>,
    ) -> Result<&mut Self, ClientError> {
        self.add_asana_client_with(AsanaClientRegistration::new().access_token(access_token))
    }

    fn add_asana_client_with_token_factory<F>(&mut self, factory: F) -> Result<&mut Self, ClientError>
    where
        F: Fn(&ServiceProvider) -> String + Send + Sync + 'static,
    {
        self.add_asana_client_with(AsanaClientRegistration::new().token_factory(factory))
    }

    fn add_asana_client_with_authentication_provider_factory<F>(
        &mut self,
        factory: F,
    ) -> Result<&mut Self, ClientError>
    where
        F: Fn(&ServiceProvider) -> Arc<dyn AuthenticationProvider> + Send + Sync + 'static,
    {
        self.add_asana_client_with(
            AsanaClientRegistration::new().authentication_provider_factory(factory),
        )
    }

    fn add_asana_client_with(
        &mut self,
        registration: AsanaClientRegistration,
    ) -> Result<&mut Self, ClientError> {
        let source = match registration.source {
            None => return Err(ClientError::missing_dependency("factory")),
            Some(CredentialSource::RawToken(raw)) => {
                CredentialSource::Token(AccessToken::new(raw)?)
            }
            Some(other) => other,
        };
        let base_url = registration.base_url;

        add_asana_http_client_factory(self, registration.http_options);
        self.add_singleton::<AsanaApiClient, _>(move |provider| {
            build_client(provider, &source, base_url.as_deref()).map(Arc::new)
        });

        if registration.register_api_client {
            self.add_singleton::<ApiClient, _>(|provider| {
                let asana = provider.get_required_service::<AsanaApiClient>()?;
                Ok(Arc::clone(asana.client()))
            });
        }

        debug!(
            api_client = registration.register_api_client,
            "Registered Asana API client"
        );
        Ok(self)
    }

    fn add_asana_client_with_api_client(
        &mut self,
        access_token: impl Into<String>,
    ) -> Result<&mut Self, ClientError> {
        self.add_asana_client_with(
            AsanaClientRegistration::new()
                .access_token(access_token)
                .with_api_client(),
        )
    }

    fn add_asana_client_with_api_client_and_token_factory<F>(
        &mut self,
        factory: F,
    ) -> Result<&mut Self, ClientError>
    where
        F: Fn(&ServiceProvider) -> String + Send + Sync + 'static,
    {
        self.add_asana_client_with(
            AsanaClientRegistration::new()
                .token_factory(factory)
                .with_api_client(),
        )
    }
}

/// Registers a pooled [`HttpClientFactory`] unless one is already present.
pub fn add_asana_http_client_factory(
    services: &mut ServiceCollection,
    options: HttpClientOptions,
) -> &mut ServiceCollection {
    services.try_add_singleton::<HttpClientFactory, _>(move |_| {
        Ok(Arc::new(HttpClientFactory::new(options.clone())?))
    })
}

fn build_client(
    provider: &ServiceProvider,
    source: &CredentialSource,
    base_url: Option<&str>,
) -> Result<AsanaApiClient, BoxError> {
    let http = provider.get_required_service::<HttpClientFactory>()?;

    let credential = match source {
        CredentialSource::Token(token) => Credential::AccessToken(token.expose().to_owned()),
        CredentialSource::RawToken(raw) => Credential::AccessToken(raw.clone()),
        CredentialSource::TokenFactory(factory) => Credential::AccessToken(factory(provider)),
        CredentialSource::AuthenticationProviderFactory(factory) => {
            Credential::AuthenticationProvider(factory(provider))
        }
    };

    let mut builder = AsanaApiClient::builder()
        .credential(credential)
        .transport(http.create_client(HTTP_CLIENT_NAME));
    if let Some(base_url) = base_url {
        builder = builder.base_url(base_url);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_registration_needs_factory() {
        let mut services = ServiceCollection::new();

        let err = services
            .add_asana_client_with(AsanaClientRegistration::new())
            .unwrap_err();

        assert_eq!(err, ClientError::missing_dependency("factory"));
        assert!(services.is_empty());
    }

    #[test]
    fn test_blank_literal_token_registers_nothing() {
        let mut services = ServiceCollection::new();

        let err = services.add_asana_client("  ").unwrap_err();

        assert_eq!(err.parameter(), "access_token");
        assert!(!services.contains::<AsanaApiClient>());
    }

    #[test]
    fn test_registration_adds_transport_factory_once() {
        let mut services = ServiceCollection::new();

        services.add_asana_client("token").unwrap();
        services.add_asana_client_with_api_client("token").unwrap();

        assert!(services.contains::<HttpClientFactory>());
        assert!(services.contains::<AsanaApiClient>());
        assert!(services.contains::<ApiClient>());
        assert_eq!(services.len(), 3);
    }

    #[test]
    fn test_registration_debug_hides_token() {
        let registration = AsanaClientRegistration::new().access_token("secret-token");

        let rendered = format!("{registration:?}");

        assert!(rendered.contains("access_token"));
        assert!(!rendered.contains("secret-token"));
    }
}
