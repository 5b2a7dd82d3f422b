//! Authentication middleware
//!
//! Bearer tokens are JWTs signed with the configured secret, carrying the
//! account number and expiring one hour after issuance. Protected routes go
//! through [`require_auth`], which verifies the token and attaches the
//! authenticated context to the request.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::state::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Account number
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

/// Authenticated identity attached to the request by [`require_auth`]
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_number: String,
}

/// Token issuing/verification and password hashing
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    /// Generate a bearer token for the account, valid for one hour.
    pub fn generate_token(&self, account_number: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::hours(1);

        let claims = Claims {
            sub: account_number.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| ServiceError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate a bearer token; expired and tampered tokens are rejected.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| ServiceError::Unauthenticated("invalid or expired token".to_string()))
    }

    pub fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        hash(password, DEFAULT_COST)
            .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {}", e)))
    }

    pub fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, ServiceError> {
        verify(password, hashed)
            .map_err(|e| ServiceError::Internal(format!("Failed to verify password: {}", e)))
    }
}

/// Layer for protected routes: verify the bearer token, attach the identity,
/// else 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ServiceError::Unauthenticated("missing bearer token".to_string()))?;

    let claims = state.auth.validate_token(token)?;

    request.extensions_mut().insert(AuthContext {
        account_number: claims.sub,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips() {
        let auth = AuthService::new("test-secret".to_string());
        let token = auth.generate_token("111").unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "111");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let auth = AuthService::new("test-secret".to_string());
        assert!(matches!(
            auth.validate_token("not-a-token"),
            Err(ServiceError::Unauthenticated(_))
        ));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let auth = AuthService::new("test-secret".to_string());
        let other = AuthService::new("other-secret".to_string());
        let token = other.generate_token("111").unwrap();
        assert!(matches!(
            auth.validate_token(&token),
            Err(ServiceError::Unauthenticated(_))
        ));
    }

    #[test]
    fn password_hash_verifies() {
        let auth = AuthService::new("test-secret".to_string());
        let hashed = auth.hash_password("pw").unwrap();
        assert!(auth.verify_password("pw", &hashed).unwrap());
        assert!(!auth.verify_password("wrong", &hashed).unwrap());
    }
}
