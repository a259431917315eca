//! Generic data-service client.
//!
//! # Responsibilities
//! - Couple request assembly, transport, status classification and the
//!   response parsing strategies into typed verbs
//! - One verb per parsing strategy: root object, embedded array, paged array
//! - Attach bearer auth when configured
//!
//! Retry policy deliberately lives above this client; a failure is reported
//! once and never replayed internally.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::capabilities::Capabilities;
use crate::client::parse::{self, Paged};
use crate::client::request::{self, HttpRequest, Method, Query};
use crate::client::status;
use crate::client::transport::{HttpTransport, Transport};
use crate::config::schema::{BridgeConfig, ServiceConfig};
use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;

/// Typed HTTP+JSON client for the data service.
#[derive(Clone)]
pub struct DataClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    capabilities: Capabilities,
    auth_token: Option<String>,
}

impl DataClient {
    /// Build a client with its own pooled HTTP transport.
    pub fn new(config: &BridgeConfig, capabilities: Capabilities) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config.transport)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            &config.service,
            capabilities,
        ))
    }

    /// Build a client over an injected transport (tests, alternate stacks).
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        service: &ServiceConfig,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            transport,
            base_url: service.base_url.clone(),
            capabilities,
            auth_token: service.auth_token.clone(),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// GET one object.
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &Query,
    ) -> ClientResult<T> {
        let body = self.send(Method::Get, segments, query, None).await?;
        parse::parse_root(&expect_body(body)?)
    }

    /// GET an array embedded under `embedded_key`.
    pub async fn get_array<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        embedded_key: &str,
        query: &Query,
    ) -> ClientResult<Vec<T>> {
        let body = self.send(Method::Get, segments, query, None).await?;
        parse::parse_embedded(&expect_body(body)?, embedded_key)
    }

    /// GET one page of an embedded array with continuation links.
    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        embedded_key: &str,
        query: &Query,
    ) -> ClientResult<Paged<T>> {
        let body = self.send(Method::Get, segments, query, None).await?;
        parse::parse_embedded_paged(&expect_body(body)?, embedded_key)
    }

    /// GET one page via a server-supplied continuation URL.
    pub async fn get_paged_url<T: DeserializeOwned>(
        &self,
        full_url: &str,
        embedded_key: &str,
    ) -> ClientResult<Paged<T>> {
        let request = request::build_from_url(Method::Get, full_url, self.capabilities)?;
        let body = self.dispatch(request).await?;
        parse::parse_embedded_paged(&expect_body(body)?, embedded_key)
    }

    /// POST a JSON body, expecting one object back.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        query: &Query,
        body: &B,
    ) -> ClientResult<T> {
        let encoded = encode_body(body)?;
        let response = self
            .send(Method::Post, segments, query, Some(encoded))
            .await?;
        parse::parse_root(&expect_body(response)?)
    }

    /// POST a JSON body, expecting no response data.
    pub async fn post_empty<B: Serialize>(
        &self,
        segments: &[&str],
        query: &Query,
        body: &B,
    ) -> ClientResult<()> {
        let encoded = encode_body(body)?;
        self.send(Method::Post, segments, query, Some(encoded))
            .await?;
        Ok(())
    }

    /// PUT a JSON body, expecting one object back.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        query: &Query,
        body: &B,
    ) -> ClientResult<T> {
        let encoded = encode_body(body)?;
        let response = self
            .send(Method::Put, segments, query, Some(encoded))
            .await?;
        parse::parse_root(&expect_body(response)?)
    }

    /// DELETE by resource path; any response data is unexpected.
    pub async fn delete(&self, segments: &[&str], query: &Query) -> ClientResult<()> {
        let body = self.send(Method::Delete, segments, query, None).await?;
        match body {
            None => Ok(()),
            Some(_) => Err(ClientError::BadResponse(
                "unexpected data on DELETE".to_string(),
            )),
        }
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Option<String>> {
        let request = request::build(
            method,
            &self.base_url,
            segments,
            query,
            body,
            self.capabilities,
        )?;
        self.dispatch(request).await
    }

    async fn dispatch(&self, mut request: HttpRequest) -> ClientResult<Option<String>> {
        if let Some(token) = &self.auth_token {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let method = request.method;
        let request_id = Uuid::new_v4();
        let start = Instant::now();
        tracing::debug!(
            request_id = %request_id,
            method = method.as_str(),
            url = %request.url,
            "request"
        );

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                metrics::record_client_error(error.kind());
                tracing::warn!(request_id = %request_id, error = %error, "transport failure");
                return Err(error);
            }
        };

        metrics::record_request(method.as_str(), response.status, start);

        if status::success_codes(method).contains(&response.status) {
            tracing::debug!(request_id = %request_id, status = response.status, "response");
            Ok(response.body)
        } else {
            let error = status::classify_failure(response.status, response.body.as_deref());
            metrics::record_client_error(error.kind());
            tracing::warn!(
                request_id = %request_id,
                status = response.status,
                error = %error,
                "request failed"
            );
            Err(error)
        }
    }
}

impl std::fmt::Debug for DataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataClient")
            .field("base_url", &self.base_url)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

fn encode_body<B: Serialize>(body: &B) -> ClientResult<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| ClientError::BadRequest(format!("body serialization failed: {}", e)))
}

fn expect_body(body: Option<String>) -> ClientResult<String> {
    body.ok_or_else(|| ClientError::BadResponse("missing response body".to_string()))
}
