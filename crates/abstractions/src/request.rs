//! The transport-neutral description of one outgoing request.
//!
//! Request builders in the generated client produce a [`RequestInformation`];
//! authentication providers decorate it; a [`crate::RequestAdapter`] executes
//! it. Nothing in here performs I/O.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::RequestError;

/// HTTP methods used by the generated request builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    /// Returns the canonical upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a request adapter needs to execute one call.
///
/// Header names are stored lower-cased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestInformation {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL without query string.
    pub url: String,
    /// Query parameters, appended in order.
    pub query: Vec<(String, String)>,
    /// Request headers keyed by lower-case name.
    pub headers: BTreeMap<String, String>,
    /// JSON request body, if any.
    pub content: Option<Value>,
}

impl RequestInformation {
    /// Creates a request with no query, headers, or body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            content: None,
        }
    }

    /// Appends a query parameter.
    pub fn add_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    /// Sets a header, replacing any previous value with the same name.
    pub fn add_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Returns `true` if a header with this name (any case) is present.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }

    /// Returns a header value by name (any case).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Serialises `body` as the JSON request content.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Serialization`] if `body` cannot be represented
    /// as JSON.
    pub fn set_json_content<T: Serialize + ?Sized>(&mut self, body: &T) -> Result<(), RequestError> {
        let value =
            serde_json::to_value(body).map_err(|e| RequestError::Serialization(e.to_string()))?;
        self.content = Some(value);
        self.add_header("content-type", "application/json");
        Ok(())
    }

    /// Parses [`Self::url`] (without the query string).
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidUrl`] if the URL is not absolute or not
    /// well-formed.
    pub fn parsed_url(&self) -> Result<Url, RequestError> {
        Url::parse(&self.url).map_err(|e| RequestError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut request = RequestInformation::new(HttpMethod::Get, "https://example.com/tasks");
        request.add_header("Authorization", "Bearer abc");

        assert!(request.has_header("authorization"));
        assert!(request.has_header("AUTHORIZATION"));
        assert_eq!(request.header("authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_set_json_content_sets_body_and_content_type() {
        let mut request = RequestInformation::new(HttpMethod::Post, "https://example.com/tasks");
        request
            .set_json_content(&json!({ "data": { "name": "Write docs" } }))
            .unwrap();

        assert_eq!(
            request.content,
            Some(json!({ "data": { "name": "Write docs" } }))
        );
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_parsed_url_rejects_relative_urls() {
        let request = RequestInformation::new(HttpMethod::Get, "/tasks/1");

        assert!(matches!(
            request.parsed_url(),
            Err(RequestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
