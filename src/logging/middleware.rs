//! Request ID generation and HTTP span construction

use axum::body::Body;
use axum::http::Request;
use tracing::Span;
use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// Returns a unique correlation ID used to tie the log lines of one proxy
/// call together.
///
/// # Examples
///
/// ```
/// use courier::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert!(!request_id.is_empty());
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span for one inbound HTTP request, used by the router's trace layer.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http",
        request_id = %generate_request_id(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_id_format() {
        let id = generate_request_id();
        // UUID v4 format: xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx
        assert_eq!(id.len(), 36);
        assert_eq!(id.chars().filter(|&c| c == '-').count(), 4);
    }

    #[test]
    fn test_generate_request_id_uniqueness() {
        let id1 = generate_request_id();
        let id2 = generate_request_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_make_request_span_does_not_panic_without_subscriber() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/history")
            .body(Body::empty())
            .unwrap();
        let _span = make_request_span(&request);
    }
}
