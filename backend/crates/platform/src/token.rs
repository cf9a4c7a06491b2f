//! Signed Bearer Token Codec
//!
//! Encodes and decodes a compact signed claims payload (subject + scope list
//! + expiry) using a symmetric secret and a named algorithm (HS256 default).
//!
//! Decode failures are classified into three terminal cases:
//! - [`TokenError::InvalidSignature`] - signature does not verify
//! - [`TokenError::Expired`] - expiry is in the past (zero leeway)
//! - [`TokenError::Malformed`] - structure cannot be parsed
//!
//! Callers are free to collapse all three into "unauthenticated".

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use jsonwebtoken::Algorithm;

/// Default token lifetime when the caller supplies no explicit window
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Token decode/encode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature does not verify against the configured secret/algorithm
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// Token expiry is in the past
    #[error("Token has expired")]
    Expired,

    /// Token structure cannot be parsed
    #[error("Token is malformed")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// Claims carried inside a signed token
///
/// Not persisted anywhere: minted at sign-in, verified per request,
/// never revoked server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the canonical username
    pub sub: String,
    /// Capability labels granted to this token
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Expiry as unix seconds
    pub exp: i64,
}

impl Claims {
    /// Create claims expiring `ttl` from now
    pub fn new(subject: impl Into<String>, scopes: Vec<String>, ttl: Duration) -> Self {
        Self {
            sub: subject.into(),
            scopes,
            exp: Utc::now().timestamp() + ttl.as_secs() as i64,
        }
    }

    /// Create claims with the default 30 minute window
    pub fn with_default_ttl(subject: impl Into<String>, scopes: Vec<String>) -> Self {
        Self::new(subject, scopes, DEFAULT_TOKEN_TTL)
    }

    /// Check whether a scope label is present
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Stateless codec bound to one secret and one algorithm
///
/// Cheap to clone-free share behind an `Arc`; no interior mutability.
pub struct TokenCodec {
    header: Header,
    validation: Validation,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// Create a codec for the given symmetric secret and algorithm
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        // Zero leeway: one second past `exp` is expired
        validation.leeway = 0;

        Self {
            header: Header::new(algorithm),
            validation,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Create an HS256 codec (the default algorithm)
    pub fn hs256(secret: &[u8]) -> Self {
        Self::new(secret, Algorithm::HS256)
    }

    /// Produce a compact signed token string
    ///
    /// Deterministic only for identical claims; `exp` is normally
    /// "now + window", making tokens effectively unique per call.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        Ok(encode(&self.header, claims, &self.encoding_key)?)
    }

    /// Verify and decode a token string
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
