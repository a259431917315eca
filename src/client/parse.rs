//! Response body parsing strategies.
//!
//! Three strategies, selected per call site: a single root object, a
//! homogeneous array embedded under a named key, or a paged array that
//! additionally carries `previous`/`next` continuation links. All three
//! tolerate unknown JSON fields, for forward compatibility with server
//! additions.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// One page of items plus optional continuation URLs.
///
/// If `next` is present, fetching it yields the subsequent page in the same
/// logical ordering; if absent, the sequence is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Envelope wrapping an embedded collection and pagination links.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "_embedded", default)]
    embedded: Option<HashMap<String, Value>>,
    #[serde(default)]
    previous: Option<String>,
    #[serde(default)]
    next: Option<String>,
}

/// Deserialize the whole body as one `T`.
///
/// A JSON `null` body is an error, not a success with an empty value.
pub fn parse_root<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ClientError::BadResponse(format!("JSON parse error: {}", e)))?;
    if value.is_null() {
        return Err(ClientError::BadResponse("Transform error".to_string()));
    }
    serde_json::from_value(value)
        .map_err(|e| ClientError::BadResponse(format!("JSON parse error: {}", e)))
}

/// Deserialize the array embedded under `key`.
///
/// A missing `_embedded` object or key means "no items" and yields an empty
/// sequence; only malformed JSON is an error.
pub fn parse_embedded<T: DeserializeOwned>(body: &str, key: &str) -> ClientResult<Vec<T>> {
    let envelope = parse_envelope(body)?;
    embedded_items(&envelope, key)
}

/// As [`parse_embedded`], additionally extracting pagination links.
pub fn parse_embedded_paged<T: DeserializeOwned>(body: &str, key: &str) -> ClientResult<Paged<T>> {
    let envelope = parse_envelope(body)?;
    let items = embedded_items(&envelope, key)?;
    Ok(Paged {
        items,
        previous: envelope.previous,
        next: envelope.next,
    })
}

fn parse_envelope(body: &str) -> ClientResult<Envelope> {
    serde_json::from_str(body)
        .map_err(|e| ClientError::BadResponse(format!("JSON parse error: {}", e)))
}

fn embedded_items<T: DeserializeOwned>(envelope: &Envelope, key: &str) -> ClientResult<Vec<T>> {
    match envelope.embedded.as_ref().and_then(|embedded| embedded.get(key)) {
        None => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| ClientError::BadResponse(format!("JSON parse error: {}", e))),
    }
}
