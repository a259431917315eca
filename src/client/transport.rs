//! Asynchronous request execution.
//!
//! # Responsibilities
//! - Execute one HTTP request without blocking the caller
//! - Own the connection pool shared by all in-flight requests
//! - Surface raw status and body; classification happens upstream
//!
//! Any I/O failure (DNS, TLS, timeout, connection reset) yields
//! `ClientError::BadResponse` carrying the underlying message; transport
//! sub-failures are not distinguished further up the stack.

use std::time::Duration;

use async_trait::async_trait;

use crate::client::request::{HttpRequest, Method};
use crate::error::{ClientError, ClientResult};

// Re-export TransportConfig from the config module to avoid duplication
pub use crate::config::schema::TransportConfig;

/// Raw response: the status code plus the body, if any.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<String>,
}

/// Executes one request asynchronously.
///
/// Implementations must support unlimited concurrent callers without
/// external locking and may invoke completions from any worker thread.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> ClientResult<HttpResponse>;
}

/// `reqwest`-backed transport sharing one pooled client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| ClientError::BadRequest(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing client, keeping its pool.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn convert_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let mut builder = self
            .client
            .request(Self::convert_method(request.method), request.url.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::BadResponse(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::BadResponse(e.to_string()))?;

        Ok(HttpResponse {
            status,
            body: if text.is_empty() { None } else { Some(text) },
        })
    }
}
