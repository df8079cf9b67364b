//! Error types shared by every crate in the workspace.
//!
//! [`ClientError`] covers argument validation while a client is being
//! constructed or registered. It is raised synchronously, before any network
//! resource is touched.
//!
//! [`RequestError`] covers failures while a request is authenticated,
//! dispatched, or its response decoded.
//!
//! [`ServiceError`] covers resolution failures in the dependency container.

use thiserror::Error;

/// Boxed error returned by container factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Construction errors
// ---------------------------------------------------------------------------

/// Validation failures raised while building or registering a client.
///
/// Both variants name the offending parameter so callers can tell which input
/// was rejected without parsing the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// A required text argument was empty or whitespace-only.
    #[error("{message} (parameter '{parameter}')")]
    InvalidArgument {
        /// Name of the rejected parameter (e.g. `"access_token"`).
        parameter: &'static str,
        /// Human-readable description of the problem.
        message: String,
    },

    /// A required object argument was not supplied.
    #[error("Required dependency '{parameter}' was not provided")]
    MissingDependency {
        /// Name of the missing parameter (e.g. `"transport"`).
        parameter: &'static str,
    },
}

impl ClientError {
    /// Creates an [`ClientError::InvalidArgument`].
    pub fn invalid_argument(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            message: message.into(),
        }
    }

    /// Creates a [`ClientError::MissingDependency`].
    pub fn missing_dependency(parameter: &'static str) -> Self {
        Self::MissingDependency { parameter }
    }

    /// Returns the name of the parameter this error refers to.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidArgument { parameter, .. } | Self::MissingDependency { parameter } => {
                parameter
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request errors
// ---------------------------------------------------------------------------

/// Failures while authenticating, sending, or decoding a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The authentication provider refused to authenticate the request.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The request URL could not be parsed.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as assembled by the request builder.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The request body could not be serialised to JSON.
    #[error("Failed to serialise request body: {0}")]
    Serialization(String),

    /// The transport failed before a response was received.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status code.
    #[error("Request failed with HTTP status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("Failed to parse response body: {0}")]
    Deserialization(String),
}

// ---------------------------------------------------------------------------
// Container errors
// ---------------------------------------------------------------------------

/// Failures while resolving a service from a [`crate::ServiceProvider`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No registration exists for the requested type.
    #[error("No service registered for type '{type_name}'")]
    NotRegistered {
        /// Fully-qualified name of the requested type.
        type_name: &'static str,
    },

    /// The registered factory failed. The failure is not cached; the next
    /// resolution runs the factory again.
    #[error("Failed to construct service '{type_name}'")]
    Construction {
        /// Fully-qualified name of the requested type.
        type_name: &'static str,
        /// The factory's error.
        source: BoxError,
    },
}
