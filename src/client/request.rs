//! Request assembly.
//!
//! # Responsibilities
//! - Join escaped path segments onto the configured base URL
//! - Append multi-valued query parameters
//! - Attach the negotiated `Accept` header and JSON content type
//!
//! A base URL that fails to parse is a configuration error (`BadRequest`)
//! reported to the caller before any network I/O is attempted.

use url::Url;

use crate::capabilities::Capabilities;
use crate::error::{ClientError, ClientResult};

/// HTTP methods used against the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Multi-valued query parameters; a key may repeat.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair, builder style.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A fully assembled request, ready for the transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// Assemble a request from the base URL, path segments and query parameters.
///
/// `body` must already be serialized JSON; serialization failures are the
/// caller's `BadRequest` to report.
pub fn build(
    method: Method,
    base_url: &str,
    segments: &[&str],
    query: &Query,
    body: Option<Vec<u8>>,
    capabilities: Capabilities,
) -> ClientResult<HttpRequest> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ClientError::BadRequest(format!("invalid base URL '{}': {}", base_url, e)))?;

    {
        let mut path = url.path_segments_mut().map_err(|_| {
            ClientError::BadRequest(format!("base URL '{}' cannot carry a path", base_url))
        })?;
        // A bare host parses with one empty segment; drop it so joining
        // never produces "//".
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }

    for (key, value) in query.pairs() {
        url.query_pairs_mut().append_pair(key, value);
    }

    Ok(decorate(method, url, body, capabilities))
}

/// Assemble a request from a full URL, as served in pagination links.
pub fn build_from_url(
    method: Method,
    full_url: &str,
    capabilities: Capabilities,
) -> ClientResult<HttpRequest> {
    let url = Url::parse(full_url)
        .map_err(|e| ClientError::BadRequest(format!("invalid URL '{}': {}", full_url, e)))?;
    Ok(decorate(method, url, None, capabilities))
}

fn decorate(
    method: Method,
    url: Url,
    body: Option<Vec<u8>>,
    capabilities: Capabilities,
) -> HttpRequest {
    let mut headers = vec![(
        "Accept".to_string(),
        capabilities.version_description().to_string(),
    )];
    if body.is_some() {
        headers.push((
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        ));
    }

    HttpRequest {
        method,
        url,
        headers,
        body,
    }
}
