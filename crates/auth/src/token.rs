//! Signed identity tokens (HS256).
//!
//! Tokens are stateless: they carry the user id and an absolute expiration,
//! and are never persisted or revoked server-side.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fieldintel_core::UserId;

/// Validity window for issued tokens, in days.
pub const TOKEN_TTL_DAYS: i64 = 15;

/// Claims carried by an identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user.
    pub user_id: UserId,
    /// Expiration, seconds since the Unix epoch.
    pub exp: i64,
}

/// Token-layer failure. Every variant surfaces as a 401 at the HTTP
/// boundary; the display strings are the user-facing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No token was presented at all.
    #[error("Missing token")]
    Missing,

    /// The presentation form could not be parsed (bad `Bearer` framing or an
    /// unreadable token header).
    #[error("Malformed token")]
    Malformed,

    /// The token's expiration instant has passed.
    #[error("Token expired")]
    Expired,

    /// Signing or any other verification failure.
    #[error("Invalid token")]
    InvalidSignature,
}

/// Encodes and verifies identity tokens with a process-wide secret.
///
/// The secret is loaded once at startup and the codec is immutable
/// afterwards; share it behind an `Arc`.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry must be exact; the default 60s leeway would keep accepting
        // tokens past their expiration instant.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `user_id`, valid for fifteen days from `issued_at`.
    pub fn encode(&self, user_id: UserId, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            user_id,
            exp: (issued_at + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::InvalidSignature)
    }

    /// Verify a presented token and recover the caller's identity.
    ///
    /// Success says nothing about whether the user still exists; that is the
    /// role resolver's concern.
    pub fn decode(&self, token: &str) -> Result<UserId, TokenError> {
        if decode_header(token).is_err() {
            return Err(TokenError::Malformed);
        }

        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::InvalidSignature,
            }
        })?;

        Ok(data.claims.user_id)
    }
}
