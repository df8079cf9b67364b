//! Pooled transport source.
//!
//! One [`HttpClientFactory`] owns one `reqwest::Client`; every client it hands
//! out is a clone sharing the same connection pool. Callers ask the factory
//! for a transport instead of building their own per call.

use std::time::Duration;

use asana_abstractions::RequestError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transport_error;

/// Transport settings applied to every client a factory hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientOptions {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Idle connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("asana-client/", env!("CARGO_PKG_VERSION")).to_owned(),
            pool_max_idle_per_host: 10,
        }
    }
}

/// Hands out transports that share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    options: HttpClientOptions,
    client: reqwest::Client,
}

impl HttpClientFactory {
    /// Builds the pooled client.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] if the TLS backend or the client
    /// configuration cannot be initialised.
    pub fn new(options: HttpClientOptions) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .user_agent(options.user_agent.clone())
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .build()
            .map_err(transport_error)?;
        Ok(Self { options, client })
    }

    /// Returns a transport for the logical client `name`.
    pub fn create_client(&self, name: &str) -> reqwest::Client {
        debug!(client = name, "Handing out pooled HTTP client");
        self.client.clone()
    }

    /// Options this factory was built with.
    pub fn options(&self) -> &HttpClientOptions {
        &self.options
    }
}
