//! Request extractors whose rejections render as [`ApiError`].

use crate::api::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body. Malformed, mistyped or oversized bodies are rejected
/// with the usual `{error, code}` payload.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string parameters, rejected the same way as [`ApiJson`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
