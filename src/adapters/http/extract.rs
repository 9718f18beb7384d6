//! Caller identity from the `X-User-Id` header.
//!
//! Identity is asserted by an upstream gateway; this service does not
//! authenticate.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::UserId;

use super::error::ErrorResponse;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Required caller identity.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

/// Caller identity when present; anonymous otherwise.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<UserId>);

fn user_from_parts(parts: &Parts) -> Option<UserId> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| UserId::new(s.trim()).ok())
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = MissingUser;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_parts(parts).map(CurrentUser).ok_or(MissingUser)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(user_from_parts(parts)))
    }
}

/// Rejection when the identity header is absent or blank.
#[derive(Debug, Clone, Copy)]
pub struct MissingUser;

impl IntoResponse for MissingUser {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(
                "UNAUTHENTICATED",
                "X-User-Id header is required",
            )),
        )
            .into_response()
    }
}
