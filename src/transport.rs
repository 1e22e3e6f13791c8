//! HTTP transport capability consumed by the sync controller.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::{SyncError, SyncResult};

/// HTTP method for a [`TransportRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A single outgoing HTTP request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Request method.
    pub method: Method,
    /// Absolute request URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Form-encoded body parameters. Empty means no body.
    pub form: Vec<(String, String)>,
}

impl TransportRequest {
    /// Creates a GET request for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            form: Vec::new(),
        }
    }

    /// Creates a POST request for `url`.
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            form: Vec::new(),
        }
    }

    /// Appends a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends a form-encoded body parameter.
    pub fn form_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }
}

/// A response with a readable body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Raw response body text.
    pub body: String,
}

/// Failure reported by an [`HttpTransport`] implementation.
///
/// Covers connection-level failures and HTTP-level rejections alike; the
/// controller does not distinguish them further.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error from a message alone.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(source: reqwest::Error) -> Self {
        Self::with_source(source.to_string(), source)
    }
}

/// Sends one HTTP request and returns one response or a failure.
///
/// Implementations own all connection policy: pooling, TLS, timeouts, and
/// any socket-level retries. The controller issues exactly one `execute`
/// call per logical request and never retries on its own.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes `request` to completion.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Default transport backed by a pooled [`reqwest::Client`].
///
/// Non-success statuses are reported as transport failures, so an HTTP
/// rejection reaches the controller the same way a refused connection does.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates the transport with a 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> SyncResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SyncError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wraps an existing client, keeping its pool and timeout settings.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        let response = builder.send().await?.error_for_status()?;
        let body = response.text().await?;

        Ok(TransportResponse { body })
    }
}
