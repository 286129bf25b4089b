//! Proxy error types

use thiserror::Error;

/// Outbound call exceeded the configured timeout.
pub const CODE_TIMEOUT: &str = "ETIMEDOUT";
/// Upstream could not be connected to (refused, DNS failure, TLS handshake).
pub const CODE_CONNECT: &str = "ECONNREFUSED";
/// Response body could not be read.
pub const CODE_BODY: &str = "EBODY";
/// Redirect limit exceeded or redirect loop.
pub const CODE_REDIRECT: &str = "EREDIRECT";
/// Any other transport failure.
pub const CODE_UPSTREAM: &str = "EUPSTREAM";

/// Errors raised while executing a proxy request.
///
/// Validation variants are raised before any I/O. [`ProxyError::Upstream`]
/// covers transport failures only; an upstream 4xx/5xx is a normal response.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("{message}")]
    Upstream { message: String, code: &'static str },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ProxyError {
    /// True for caller mistakes detected before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ProxyError::MissingUrl
                | ProxyError::InvalidUrl { .. }
                | ProxyError::InvalidMethod(_)
                | ProxyError::InvalidHeader { .. }
        )
    }

    /// Machine-readable code for upstream failures.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ProxyError::Upstream { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classify a transport failure reported by the HTTP client.
    pub fn upstream(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            CODE_TIMEOUT
        } else if err.is_connect() {
            CODE_CONNECT
        } else if err.is_redirect() {
            CODE_REDIRECT
        } else if err.is_body() || err.is_decode() {
            CODE_BODY
        } else {
            CODE_UPSTREAM
        };

        ProxyError::Upstream {
            message: describe(&err),
            code,
        }
    }
}

/// Render an error with its root cause, which reqwest keeps out of `Display`.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    let mut root = None;
    while let Some(cause) = source {
        root = Some(cause);
        source = cause.source();
    }
    if let Some(cause) = root {
        message.push_str(": ");
        message.push_str(&cause.to_string());
    }
    message
}
