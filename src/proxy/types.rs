//! Proxy request and response types.

use crate::history::ResponseRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A request the caller wants executed upstream.
///
/// Every field is optional on the wire so a missing `url` can be reported as
/// a validation failure instead of a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<Value>,
}

impl ProxyRequest {
    /// Shorthand for a bodiless request.
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: Some(method.to_string()),
            url: Some(url.to_string()),
            headers: None,
            body: None,
        }
    }
}

/// Outcome of a completed upstream exchange, whatever its status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    #[serde(flatten)]
    pub response: ResponseRecord,
    pub duration_ms: u64,
}

/// Upper-case `method`, defaulting to GET when absent or blank.
pub fn normalize_method(method: Option<&str>) -> String {
    match method.map(str::trim) {
        Some(m) if !m.is_empty() => m.to_uppercase(),
        _ => "GET".to_string(),
    }
}
