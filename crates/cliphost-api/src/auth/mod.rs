//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs whose subject is the caller's user id. Validation
//! happens in an extractor so handlers receive the resolved identity; token
//! issuance lives with the operator tooling and tests.

pub mod jwt;

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use cliphost_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated caller identity, extracted from the `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("Missing authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::Unauthenticated("Authorization header is not a bearer token".to_string())
        })
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = HttpAppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user_id = jwt::validate_token(token, &state.config.jwt_secret)?;
        Ok(AuthUser(user_id))
    }
}
