//! HTTP error mapping.
//!
//! Bodies follow `{"detail": "..."}` so existing clients keep parsing them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use inventory_core::ServiceError;
use log::error;
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NOT_FOUND_DETAIL: &str = "Item not found";

/// Transport-level error returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// 422: malformed body, query, path, or field values.
    Validation(String),
    /// 404: id does not resolve to an item.
    NotFound,
    /// 500: storage unavailable or inconsistent.
    Persistence(String),
    /// 500: worker or runtime failure outside the store.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound => write!(f, "{NOT_FOUND_DETAIL}"),
            Self::Persistence(message) => write!(f, "storage error: {message}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(err) => Self::Validation(err.to_string()),
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::Persistence(err) => Self::Persistence(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_error module=server status=error http_status={} error={self}",
                status.as_u16()
            );
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
