// ABOUTME: JWT authentication manager resolving bearer tokens to owner identities
// ABOUTME: HS256 tokens; every core operation receives the resolved owner id explicitly

//! Authentication.
//!
//! The auth collaborator's contract: every incoming call carries a bearer
//! token that resolves to an opaque owner id, and absence of a valid
//! identity rejects the request before any core logic runs. Core code
//! never reaches into ambient request state; the owner id is always an
//! explicit argument.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for user session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

/// Generates and validates session tokens
#[derive(Clone)]
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    expiry_hours: i64,
}

impl AuthManager {
    #[must_use]
    pub const fn new(jwt_secret: Vec<u8>, expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            expiry_hours,
        }
    }

    /// Issue a token for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn generate_token(&self, user_id: Uuid) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )
        .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` on a malformed, mis-signed, or expired token.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::auth_invalid(format!("Invalid token: {e}")))
    }

    /// Resolve a bearer token to an owner id.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` if the token is invalid or its subject is not
    /// a UUID.
    pub fn owner_id_from_token(&self, token: &str) -> AppResult<Uuid> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|e| AppError::auth_invalid(format!("Invalid subject in token: {e}")))
    }
}

/// Generate a random HS256 signing secret
#[must_use]
pub fn generate_jwt_secret() -> [u8; 64] {
    let mut secret = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// # Errors
///
/// Returns `AuthRequired` when the header is absent and `AuthInvalid` when
/// it does not carry a bearer token.
pub fn extract_bearer_token(auth_header: Option<&str>) -> AppResult<&str> {
    let header = auth_header.ok_or_else(AppError::auth_required)?;
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::auth_invalid("Authorization header must be a bearer token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AuthManager {
        AuthManager::new(generate_jwt_secret().to_vec(), 24)
    }

    #[test]
    fn test_round_trip_token() {
        let auth = manager();
        let user_id = Uuid::new_v4();
        let token = auth.generate_token(user_id).unwrap();
        assert_eq!(auth.owner_id_from_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = manager().generate_token(Uuid::new_v4()).unwrap();
        let other = manager();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_bearer_extraction() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert!(extract_bearer_token(None).is_err());
        assert!(extract_bearer_token(Some("Basic dXNlcg==")).is_err());
        assert!(extract_bearer_token(Some("Bearer ")).is_err());
    }
}
