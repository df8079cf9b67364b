//! Authentication ports and the bearer-token chain.
//!
//! An [`AuthenticationProvider`] decorates a [`RequestInformation`] before the
//! adapter sends it. The bearer chain splits the job in two:
//! [`AccessTokenProvider`] decides *which* token applies to a URL, and
//! [`BaseBearerTokenAuthenticationProvider`] decides *whether and how* to put
//! it on the request.
//!
//! ## Rules
//!
//! - A request that already carries an `Authorization` header is left alone.
//! - Tokens are only attached to `https` URLs, except for loopback hosts.
//! - Hosts rejected by the token provider's allow-list are sent
//!   unauthenticated without asking the provider for a token.
//! - An empty token (e.g. for a host outside the allow-list) means "send
//!   unauthenticated", not an error.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::{Host, Url};

use crate::{AccessToken, RequestError, RequestInformation};

const AUTHORIZATION: &str = "authorization";

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Authenticates outgoing requests.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Adds whatever credentials `request` needs.
    async fn authenticate_request(&self, request: &mut RequestInformation)
        -> Result<(), RequestError>;
}

/// Produces a bearer token for a given request URL.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Returns the token for `url`, or an empty string when none applies.
    async fn get_authorization_token(&self, url: &Url) -> Result<String, RequestError>;

    /// Hosts this provider is willing to hand tokens to.
    fn allowed_hosts_validator(&self) -> &AllowedHostsValidator;
}

// ---------------------------------------------------------------------------
// Host allow-list
// ---------------------------------------------------------------------------

/// Case-insensitive allow-list of hosts. An empty list allows every host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedHostsValidator {
    hosts: BTreeSet<String>,
}

impl AllowedHostsValidator {
    /// Creates a validator allowing exactly `hosts`.
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            hosts: hosts
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// Returns the configured hosts in sorted order.
    pub fn allowed_hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }

    /// Returns `true` if a token may be sent to `url`'s host.
    pub fn is_url_host_valid(&self, url: &Url) -> bool {
        if self.hosts.is_empty() {
            return true;
        }
        url.host_str()
            .is_some_and(|host| self.hosts.contains(&host.to_ascii_lowercase()))
    }
}

// ---------------------------------------------------------------------------
// Token providers
// ---------------------------------------------------------------------------

/// Hands out one fixed token for every allowed host.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
    validator: AllowedHostsValidator,
}

impl StaticTokenProvider {
    /// Creates a provider that allows every host.
    pub fn new(token: AccessToken) -> Self {
        Self {
            token,
            validator: AllowedHostsValidator::default(),
        }
    }

    /// Restricts the hosts the token is sent to.
    #[must_use]
    pub fn with_allowed_hosts(mut self, validator: AllowedHostsValidator) -> Self {
        self.validator = validator;
        self
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn get_authorization_token(&self, url: &Url) -> Result<String, RequestError> {
        if !self.validator.is_url_host_valid(url) {
            return Ok(String::new());
        }
        Ok(self.token.expose().to_owned())
    }

    fn allowed_hosts_validator(&self) -> &AllowedHostsValidator {
        &self.validator
    }
}

// ---------------------------------------------------------------------------
// Authentication providers
// ---------------------------------------------------------------------------

/// Adds `Authorization: Bearer <token>` using an [`AccessTokenProvider`].
#[derive(Clone)]
pub struct BaseBearerTokenAuthenticationProvider {
    token_provider: Arc<dyn AccessTokenProvider>,
}

impl BaseBearerTokenAuthenticationProvider {
    /// Creates a provider around `token_provider`.
    pub fn new(token_provider: Arc<dyn AccessTokenProvider>) -> Self {
        Self { token_provider }
    }

    /// Shorthand for a bearer provider over a [`StaticTokenProvider`].
    pub fn from_token(token: AccessToken) -> Self {
        Self::new(Arc::new(StaticTokenProvider::new(token)))
    }
}

impl std::fmt::Debug for BaseBearerTokenAuthenticationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseBearerTokenAuthenticationProvider")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthenticationProvider for BaseBearerTokenAuthenticationProvider {
    async fn authenticate_request(
        &self,
        request: &mut RequestInformation,
    ) -> Result<(), RequestError> {
        if request.has_header(AUTHORIZATION) {
            debug!("Request already carries an Authorization header; leaving it unchanged");
            return Ok(());
        }

        let url = request.parsed_url()?;
        if url.scheme() != "https" && !is_loopback(&url) {
            return Err(RequestError::Authentication(format!(
                "refusing to send a bearer token over '{}' to host '{}'",
                url.scheme(),
                url.host_str().unwrap_or_default()
            )));
        }

        if !self
            .token_provider
            .allowed_hosts_validator()
            .is_url_host_valid(&url)
        {
            debug!(
                host = url.host_str().unwrap_or_default(),
                "Host outside allow-list; sending request unauthenticated"
            );
            return Ok(());
        }

        let token = self.token_provider.get_authorization_token(&url).await?;
        if token.is_empty() {
            debug!(
                host = url.host_str().unwrap_or_default(),
                "No token for host; sending request unauthenticated"
            );
            return Ok(());
        }

        request.add_header(AUTHORIZATION, format!("Bearer {token}"));
        Ok(())
    }
}

/// Leaves every request untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousAuthenticationProvider;

#[async_trait]
impl AuthenticationProvider for AnonymousAuthenticationProvider {
    async fn authenticate_request(
        &self,
        _request: &mut RequestInformation,
    ) -> Result<(), RequestError> {
        Ok(())
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
