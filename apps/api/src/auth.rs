//! JWT authentication module.
//!
//! Issues and verifies the short-lived bearer tokens that guard the entity
//! and image routes. There is no credential store behind it: any non-empty
//! username can obtain a token.
//!
//! ## Token Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  POST /token (username) ──► issue ──► HS256 { sub, iat, exp, jti }     │
//! │                                              │                          │
//! │  Authorization: Bearer <token>               │                          │
//! │         │                                    │                          │
//! │         ▼                                    ▼                          │
//! │  AuthUser extractor ──► verify ──► exp <= now ? 401 : Claims           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// A signed token as handed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub token_type: String,
}

/// Token failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing, malformed, wrongly signed or expired token.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Encoding the claims failed.
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// JWT token issuer.
pub struct TokenIssuer {
    secret: SecretString,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_minutes", &self.ttl.num_minutes())
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// A lifetime too large for a `Duration` saturates; issuing with it then
    /// fails instead of producing a token.
    pub fn new(secret: SecretString, ttl_minutes: i64) -> Self {
        TokenIssuer {
            secret,
            ttl: Duration::try_minutes(ttl_minutes).unwrap_or(Duration::MAX),
        }
    }

    /// Issue a token for `subject` with the default lifetime.
    pub fn issue(&self, subject: &str) -> Result<Credential, AuthError> {
        self.issue_at(subject, self.ttl, Utc::now())
    }

    /// Issue a token for `subject` with a caller-chosen lifetime.
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<Credential, AuthError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<Credential, AuthError> {
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Signing("token lifetime out of range".to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let access_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(Credential {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Validate and decode a token.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Validate and decode a token as if the current time were `now`.
    ///
    /// A token whose `exp` is at or before `now` is expired. No leeway.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?
        .claims;

        if claims.exp <= now.timestamp() {
            return Err(AuthError::InvalidToken("token expired".to_string()));
        }

        Ok(claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// Extractor
// =============================================================================

/// Extractor that requires a valid bearer token and provides its claims.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AuthError::InvalidToken("missing authorization header".to_string()))?;

        let token = extract_bearer_token(auth_header).ok_or_else(|| {
            AuthError::InvalidToken("invalid authorization header format".to_string())
        })?;

        match state.tokens.verify(token) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(err) => {
                warn!(error = %err, path = %parts.uri.path(), "Rejected bearer token");
                Err(err.into())
            }
        }
    }
}
