//! # Proxy Executor
//!
//! Executes one outbound HTTP request per call on behalf of the caller and
//! records the outcome in the request history.
//!
//! ## Outcome rules
//!
//! - Upstream responses of any status (1xx-5xx) are successful outcomes.
//! - Transport failures (connect, DNS, timeout, unreadable body) become
//!   [`ProxyError::Upstream`] with a code such as `ETIMEDOUT`.
//! - A missing URL, bad method or bad header is rejected before any I/O and
//!   is never recorded.
//!
//! ## History
//!
//! Once the outcome is known, a [`HistoryEntry`] is written inline. A failed
//! write is logged and counted but never changes the outcome returned to the
//! caller.
//!
//! ## Body handling
//!
//! A JSON string body is sent as raw text. Any other JSON value is sent as
//! serialized JSON with `content-type: application/json` unless the caller
//! supplied a content type.

mod error;
mod types;

pub use error::*;
pub use types::*;

use crate::config::ProxyConfig;
use crate::history::{ErrorRecord, HistoryEntry, HistoryRepository, ResponseRecord};
use crate::ids::next_id;
use crate::logging::generate_request_id;
use crate::metrics::{HISTORY_WRITE_FAILURES, PROXY_DURATION_SECONDS, PROXY_REQUESTS_TOTAL};
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn, Instrument};

/// Issues outbound requests and records them in history.
pub struct ProxyExecutor {
    client: reqwest::Client,
    history: HistoryRepository,
    log_bodies: bool,
}

/// A validated request, ready to send.
#[derive(Debug)]
struct Outbound {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl ProxyExecutor {
    /// Build an executor with an HTTP client configured from `config`.
    pub fn new(config: &ProxyConfig, history: HistoryRepository) -> Result<Self, ProxyError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .pool_max_idle_per_host(10);
        if let Some(ref agent) = config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| ProxyError::Client(e.to_string()))?;

        Ok(Self {
            client,
            history,
            log_bodies: false,
        })
    }

    /// Log request and response bodies at debug level.
    pub fn with_body_logging(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    /// Execute `request` upstream and record the outcome.
    pub async fn execute(&self, request: ProxyRequest) -> Result<ProxyResponse, ProxyError> {
        let outbound = prepare(&request)?;
        let request_id = generate_request_id();
        let span = tracing::info_span!(
            "proxy",
            request_id = %request_id,
            method = %outbound.method,
            url = %outbound.url,
        );

        async move {
            if self.log_bodies {
                debug!(body = ?outbound.body, "Outbound request body");
            }

            let start = Instant::now();
            let result = self.send(&outbound).await;
            let elapsed = start.elapsed();
            let duration_ms = elapsed.as_millis() as u64;
            let recorded_at = Utc::now();

            let outcome_label = match &result {
                Ok(response) => {
                    info!(status = response.status, duration_ms, "Upstream responded");
                    "response"
                }
                Err(e) => {
                    warn!(error = %e, code = e.code(), duration_ms, "Upstream request failed");
                    "upstream_error"
                }
            };
            metrics::counter!(PROXY_REQUESTS_TOTAL,
                "method" => method_label(&outbound.method),
                "outcome" => outcome_label
            )
            .increment(1);
            metrics::histogram!(PROXY_DURATION_SECONDS).record(elapsed.as_secs_f64());

            let entry = HistoryEntry {
                id: next_id(recorded_at),
                method: outbound.method.as_str().to_string(),
                url: request.url.clone().unwrap_or_default(),
                request_headers: request.headers.clone(),
                request_body: request.body.clone(),
                response: result.as_ref().ok().cloned(),
                error: result.as_ref().err().map(|e| ErrorRecord {
                    message: e.to_string(),
                    code: e.code().map(str::to_string),
                }),
                duration_ms,
                timestamp: recorded_at,
            };
            if let Err(e) = self.history.record(&entry).await {
                warn!(error = %e, entry_id = %entry.id, "Failed to record request history");
                metrics::counter!(HISTORY_WRITE_FAILURES).increment(1);
            }

            result.map(|response| ProxyResponse {
                response,
                duration_ms,
            })
        }
        .instrument(span)
        .await
    }

    async fn send(&self, outbound: &Outbound) -> Result<ResponseRecord, ProxyError> {
        let mut builder = self
            .client
            .request(outbound.method.clone(), outbound.url.clone())
            .headers(outbound.headers.clone());
        if let Some(ref body) = outbound.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(ProxyError::upstream)?;
        let status = response.status();
        let headers = flatten_headers(response.headers());
        let bytes = response.bytes().await.map_err(ProxyError::upstream)?;

        if self.log_bodies {
            debug!(body = %String::from_utf8_lossy(&bytes), "Upstream response body");
        }

        Ok(ResponseRecord {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            data: decode_body(&bytes),
        })
    }
}

/// Validate `request` and turn it into something the client can send.
fn prepare(request: &ProxyRequest) -> Result<Outbound, ProxyError> {
    let raw_url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(ProxyError::MissingUrl)?;

    let url = Url::parse(raw_url).map_err(|e| ProxyError::InvalidUrl {
        url: raw_url.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProxyError::InvalidUrl {
            url: raw_url.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    let method_name = normalize_method(request.method.as_deref());
    let method = Method::from_bytes(method_name.as_bytes())
        .map_err(|_| ProxyError::InvalidMethod(method_name.clone()))?;

    let mut headers = HeaderMap::new();
    for (name, value) in request.headers.iter().flatten() {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ProxyError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| ProxyError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        headers.append(header_name, header_value);
    }

    let body = match &request.body {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(value) => {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            Some(value.to_string())
        }
    };

    Ok(Outbound {
        method,
        url,
        headers,
        body,
    })
}

/// Metric label for `method`. Extension methods share one label so callers
/// cannot grow the series set.
fn method_label(method: &Method) -> &'static str {
    const STANDARD: [&str; 9] = [
        "GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "TRACE", "CONNECT",
    ];
    STANDARD
        .into_iter()
        .find(|m| *m == method.as_str())
        .unwrap_or("OTHER")
}

/// Collapse a header map into one string per name, joining repeats with ", ".
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        flat.insert(name.as_str().to_string(), joined);
    }
    flat
}

/// Parse the body as JSON when possible, otherwise keep it as text.
fn decode_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn request(url: Option<&str>) -> ProxyRequest {
        ProxyRequest {
            method: None,
            url: url.map(str::to_string),
            headers: None,
            body: None,
        }
    }

    #[test]
    fn test_prepare_missing_url() {
        assert!(matches!(prepare(&request(None)), Err(ProxyError::MissingUrl)));
        assert!(matches!(
            prepare(&request(Some("   "))),
            Err(ProxyError::MissingUrl)
        ));
    }

    #[test]
    fn test_prepare_invalid_url() {
        assert!(matches!(
            prepare(&request(Some("not a url"))),
            Err(ProxyError::InvalidUrl { .. })
        ));
        assert!(matches!(
            prepare(&request(Some("ftp://example.com/file"))),
            Err(ProxyError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_prepare_defaults_to_get() {
        let outbound = prepare(&request(Some("http://example.com"))).unwrap();
        assert_eq!(outbound.method, Method::GET);
        assert!(outbound.headers.is_empty());
        assert!(outbound.body.is_none());
    }

    #[test]
    fn test_prepare_rejects_invalid_method() {
        let mut req = request(Some("http://example.com"));
        req.method = Some("GE T".to_string());
        assert!(matches!(prepare(&req), Err(ProxyError::InvalidMethod(_))));
    }

    #[test]
    fn test_prepare_rejects_invalid_header() {
        let mut req = request(Some("http://example.com"));
        req.headers = Some(HashMap::from([(
            "bad header".to_string(),
            "v".to_string(),
        )]));
        assert!(matches!(prepare(&req), Err(ProxyError::InvalidHeader { .. })));
    }

    #[test]
    fn test_prepare_json_body_sets_content_type() {
        let mut req = request(Some("http://example.com"));
        req.method = Some("post".to_string());
        req.body = Some(json!({"a": 1}));

        let outbound = prepare(&req).unwrap();
        assert_eq!(outbound.method, Method::POST);
        assert_eq!(outbound.body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(outbound.headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_prepare_json_body_keeps_caller_content_type() {
        let mut req = request(Some("http://example.com"));
        req.headers = Some(HashMap::from([(
            "Content-Type".to_string(),
            "application/vnd.api+json".to_string(),
        )]));
        req.body = Some(json!([1, 2]));

        let outbound = prepare(&req).unwrap();
        assert_eq!(outbound.headers[CONTENT_TYPE], "application/vnd.api+json");
    }

    #[test]
    fn test_prepare_text_body_passes_through() {
        let mut req = request(Some("http://example.com"));
        req.body = Some(json!("a=1&b=2"));

        let outbound = prepare(&req).unwrap();
        assert_eq!(outbound.body.as_deref(), Some("a=1&b=2"));
        assert!(!outbound.headers.contains_key(CONTENT_TYPE));
    }

    #[test]
    fn test_prepare_null_body_sends_nothing() {
        let mut req = request(Some("http://example.com"));
        req.body = Some(Value::Null);
        assert!(prepare(&req).unwrap().body.is_none());
    }

    #[test]
    fn test_method_label_collapses_extension_methods() {
        assert_eq!(method_label(&Method::PATCH), "PATCH");
        assert_eq!(method_label(&Method::from_bytes(b"PURGE").unwrap()), "OTHER");
        assert_eq!(method_label(&Method::from_bytes(b"X-RANDOM-1").unwrap()), "OTHER");
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(br#"{"ok":true}"#), json!({"ok": true}));
        assert_eq!(decode_body(b"plain text"), json!("plain text"));
        assert_eq!(decode_body(b""), json!(""));
    }

    #[test]
    fn test_flatten_headers_joins_repeats() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));
        headers.insert("x-one", HeaderValue::from_static("1"));

        let flat = flatten_headers(&headers);
        assert_eq!(flat["set-cookie"], "a=1, b=2");
        assert_eq!(flat["x-one"], "1");
    }
}
