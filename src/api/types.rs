//! Response envelopes and error mapping for the HTTP API.

use crate::groups::GroupError;
use crate::proxy::ProxyError;
use crate::store::StoreError;
use crate::templates::TemplateError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

pub const CODE_VALIDATION: &str = "validation_error";
pub const CODE_NOT_FOUND: &str = "not_found";
pub const CODE_STORE: &str = "store_error";
pub const CODE_TOO_LARGE: &str = "payload_too_large";

/// Acknowledgement returned by delete operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// API error response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: message.to_string(),
            code: Some(CODE_VALIDATION.to_string()),
        }
    }

    /// Create a not found error (404).
    pub fn not_found(message: &str) -> Self {
        Self {
            error: message.to_string(),
            code: Some(CODE_NOT_FOUND.to_string()),
        }
    }

    /// Create an upstream transport error (500) carrying the failure code.
    pub fn upstream(message: &str, code: &str) -> Self {
        Self {
            error: message.to_string(),
            code: Some(code.to_string()),
        }
    }

    /// Create a store error (500).
    pub fn store(message: &str) -> Self {
        Self {
            error: message.to_string(),
            code: Some(CODE_STORE.to_string()),
        }
    }

    /// Get the HTTP status code for this error.
    fn status_code(&self) -> StatusCode {
        match self.code.as_deref() {
            Some(CODE_VALIDATION) => StatusCode::BAD_REQUEST,
            Some(CODE_NOT_FOUND) => StatusCode::NOT_FOUND,
            Some(CODE_TOO_LARGE) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self {
                error: rejection.body_text(),
                code: Some(CODE_TOO_LARGE.to_string()),
            };
        }
        // Missing content type, broken syntax and wrong field types all land here
        ApiError::bad_request(&rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(&rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Store operation failed");
        ApiError::store(&err.to_string())
    }
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        if err.is_validation() {
            return ApiError::bad_request(&err.to_string());
        }
        match err.code() {
            Some(code) => ApiError::upstream(&err.to_string(), code),
            None => ApiError {
                error: err.to_string(),
                code: None,
            },
        }
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::Store(e) => e.into(),
            e @ TemplateError::MissingField => ApiError::bad_request(&e.to_string()),
        }
    }
}

impl From<GroupError> for ApiError {
    fn from(err: GroupError) -> Self {
        match err {
            GroupError::Store(e) => e.into(),
            e @ GroupError::MissingName => ApiError::bad_request(&e.to_string()),
            e @ GroupError::NotFound(_) => ApiError::not_found(&e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::CODE_TIMEOUT;

    #[test]
    fn test_api_error_serialize_flat() {
        let error = ApiError::upstream("timed out", CODE_TIMEOUT);
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["error"], "timed out");
        assert_eq!(json["code"], "ETIMEDOUT");
    }

    #[test]
    fn test_api_error_without_code_omits_field() {
        let error = ApiError {
            error: "boom".to_string(),
            code: None,
        };
        let json = serde_json::to_value(&error).unwrap();
        assert!(json.get("code").is_none());
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::bad_request("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::upstream("x", "ECONNREFUSED").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::store("x").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_proxy_validation_maps_to_400() {
        let error: ApiError = ProxyError::MissingUrl.into();
        assert_eq!(error.error, "URL is required");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_proxy_upstream_keeps_code() {
        let error: ApiError = ProxyError::Upstream {
            message: "connection refused".to_string(),
            code: "ECONNREFUSED",
        }
        .into();
        assert_eq!(error.code.as_deref(), Some("ECONNREFUSED"));
    }

    #[test]
    fn test_group_not_found_maps_to_404() {
        let error: ApiError = GroupError::NotFound("42".to_string()).into();
        assert!(error.error.contains("42"));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_template_store_error_maps_to_500() {
        let error: ApiError =
            TemplateError::Store(StoreError::Unavailable("down".to_string())).into();
        assert_eq!(error.code.as_deref(), Some(CODE_STORE));
        assert!(error.error.contains("down"));
    }

    #[test]
    fn test_status_for_too_large_code() {
        let error = ApiError {
            error: "length limit exceeded".to_string(),
            code: Some(CODE_TOO_LARGE.to_string()),
        };
        assert_eq!(
            error.into_response().status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_success_response_serialize() {
        let json = serde_json::to_value(&SuccessResponse { success: true }).unwrap();
        assert_eq!(json, serde_json::json!({"success": true}));
    }
}
