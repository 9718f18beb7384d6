//! Error body and status mapping shared by all endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::ErrorCode;
use crate::domain::item::ItemError;
use crate::domain::negotiation::NegotiationError;

/// Standard error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Any failure an endpoint can return.
#[derive(Debug)]
pub enum ApiError {
    Item(ItemError),
    Negotiation(NegotiationError),
    /// Malformed path or body that never reached a handler.
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn code(&self) -> ErrorCode {
        match self {
            ApiError::Item(e) => e.code(),
            ApiError::Negotiation(e) => e.code(),
            ApiError::BadRequest(_) => ErrorCode::ValidationFailed,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Item(e) => e.to_string(),
            ApiError::Negotiation(e) => e.to_string(),
            ApiError::BadRequest(m) => m.clone(),
        }
    }
}

impl From<ItemError> for ApiError {
    fn from(err: ItemError) -> Self {
        ApiError::Item(err)
    }
}

impl From<NegotiationError> for ApiError {
    fn from(err: NegotiationError) -> Self {
        ApiError::Negotiation(err)
    }
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ItemNotFound | ErrorCode::MessageNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InvalidOperation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::UpstreamFailure => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = status_for(code);

        // Storage details stay in the log.
        let message = if status.is_server_error() && code != ErrorCode::UpstreamFailure {
            tracing::error!(error = %self.message(), "request failed");
            "Internal server error".to_string()
        } else {
            self.message()
        };

        (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
    }
}
