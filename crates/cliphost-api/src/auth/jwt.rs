//! HS256 JWT issue/validate.

use chrono::{Duration, Utc};
use cliphost_core::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ISSUER: &str = "cliphost";

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub iss: String,
    pub sub: String, // user_id
    pub iat: i64,    // issued at timestamp
    pub exp: i64,    // expiration timestamp
}

/// Issue a signed access token for a user.
pub fn issue_token(
    user_id: Uuid,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = JwtClaims {
        iss: ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Validate a bearer token and return the caller's user id.
pub fn validate_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AppError::Unauthenticated(format!("Invalid bearer token: {}", e)))?;

    Uuid::parse_str(&data.claims.sub)
        .map_err(|e| AppError::Unauthenticated(format!("Invalid token subject: {}", e)))
}
