//! Application Configuration
//!
//! Token issuance configuration for the directory application layer.
//! The secret and algorithm are process configuration, never
//! request-visible state.

use std::time::Duration;

use platform::token::{Algorithm, DEFAULT_TOKEN_TTL, TokenCodec};

/// Directory auth configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric secret for token signing
    pub token_secret: Vec<u8>,
    /// Signing algorithm (HS256 by default)
    pub token_algorithm: Algorithm,
    /// Access token lifetime (30 minutes by default)
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; 32],
            token_algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Build the codec bound to this secret and algorithm
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(&self.token_secret, self.token_algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl, Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_random_secret_differs() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.token_secret, b.token_secret);
    }
}
