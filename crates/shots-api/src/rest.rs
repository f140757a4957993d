//! REST plumbing for the remote service.
//!
//! Request building, auth decoration, and response classification
//! shared by every typed call in [`crate::client`].

use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by remote calls.
///
/// The service's finer-grained HTTP statuses are deliberately not
/// distinguished: anything that is not a success and not a 404 is a
/// [`ApiError::Network`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport failure, timeout, or a non-success status other
    /// than 404.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("unexpected response: {0}")]
    Parse(String),
}

/// Result type for remote operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// HTTP method for an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET, for reads and the relationship probe.
    Get,
    /// PUT, for creating a follow relationship.
    Put,
    /// DELETE, for removing a follow relationship.
    Delete,
}

/// A request to the remote service.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the service base URL.
    pub path: String,
    /// Query parameters, in insertion order.
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), params: Vec::new() }
    }

    /// Create a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self { method: Method::Put, path: path.into(), params: Vec::new() }
    }

    /// Create a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::Delete, path: path.into(), params: Vec::new() }
    }

    /// Add a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }
}

/// Configuration for [`RestClient`].
#[derive(Debug, Clone)]
pub struct RestClientConfig {
    /// Service base URL.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Viewer access token, attached as a bearer header when present.
    pub access_token: Option<String>,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dribbble.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Shotstream/{}", env!("CARGO_PKG_VERSION")),
            access_token: None,
        }
    }
}

impl RestClientConfig {
    /// Create a config with a service base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Attach the viewer's access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Classify an HTTP status into the error taxonomy.
pub(crate) fn classify_status(status: u16, path: &str) -> Result<()> {
    match status {
        s if (200..300).contains(&s) => Ok(()),
        404 => Err(ApiError::NotFound(path.to_string())),
        s => Err(ApiError::Network(format!("HTTP {s} from {path}"))),
    }
}

/// Thin HTTP client over the remote service.
///
/// Holds no session state beyond the configured token; cloning is
/// cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: HttpClient,
    config: RestClientConfig,
}

impl RestClient {
    /// Build a client from config.
    pub fn new(config: RestClientConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { http, config }
    }

    /// Issue a request, returning the raw response on any success
    /// status.
    pub async fn send(&self, request: ApiRequest) -> Result<Response> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );

        let mut req = match request.method {
            Method::Get => self.http.get(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };

        if !request.params.is_empty() {
            req = req.query(&request.params);
        }
        if let Some(token) = &self.config.access_token {
            req = req.bearer_auth(token);
        }

        tracing::debug!(method = ?request.method, path = %request.path, "issuing request");
        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("request failed: {e}")))?;

        classify_status(response.status().as_u16(), &request.path)?;
        Ok(response)
    }

    /// Issue a request and decode the JSON body.
    pub async fn json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        let response = self.send(request).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Parse(format!("failed to read body from {path}: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Parse(format!("failed to decode body from {path}: {e}")))
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
