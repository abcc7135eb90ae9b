// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Signed bearer token issuance and verification.
//!
//! Tokens carry only the user id and timing claims. Roles and permissions are
//! never embedded; they are loaded fresh from the credential store on every
//! authenticated request so that a revoked role takes effect immediately.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// TokenError
// =============================================================================

/// Why a presented token failed verification.
///
/// Only two outcomes exist on purpose: a token that was once valid but is past
/// its expiry, and everything else. Callers that talk to clients must collapse
/// both into one generic rejection; the distinction is for logs only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token was validly signed but its expiry instant has passed.
    #[error("token expired")]
    Expired,

    /// The token is malformed, tampered with, signed with the wrong key, or
    /// otherwise unverifiable.
    #[error("token rejected: {0}")]
    Malformed(String),

    /// Token issuance failed. Indicates a configuration problem, not a
    /// client problem.
    #[error("token issuance failed: {0}")]
    Issuance(String),
}

// =============================================================================
// TokenConfig
// =============================================================================

/// Token codec configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Secret key for signing tokens.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Token issuer.
    pub issuer: String,
    /// Token lifetime in seconds.
    pub expiration_secs: i64,
    /// Algorithm to use for signing.
    #[serde(with = "algorithm_serde")]
    pub algorithm: Algorithm,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // Must be set by user
            issuer: "planta".to_string(),
            expiration_secs: 3600, // 1 hour
            algorithm: Algorithm::HS256,
            // Expiry is a hard cutoff; no grace window.
            leeway_secs: 0,
        }
    }
}

impl TokenConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Sets the token lifetime.
    pub fn with_expiration(mut self, duration: Duration) -> Self {
        self.expiration_secs = duration.as_secs() as i64;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::Issuance(
                "token secret is not configured".to_string(),
            ));
        }
        if self.secret.len() < 32 {
            tracing::warn!("token secret is shorter than recommended (32 bytes)");
        }
        Ok(())
    }
}

// =============================================================================
// TokenClaims
// =============================================================================

/// Claims carried by an issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject: the user id, as a decimal string.
    pub sub: String,
    /// Expiration time (Unix timestamp, seconds).
    pub exp: i64,
    /// Issued-at time (Unix timestamp, seconds).
    pub iat: i64,
    /// Issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Unique token id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl TokenClaims {
    /// Creates claims for the given user, expiring after `expiration_secs`.
    pub fn new(user_id: i64, expiration_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            exp: now + expiration_secs,
            iat: now,
            iss: None,
            jti: Some(Uuid::now_v7().to_string()),
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    /// Parses the subject claim back into a user id.
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub
            .parse()
            .map_err(|_| TokenError::Malformed(format!("non-numeric subject: {}", self.sub)))
    }

    /// Seconds remaining until expiry, negative when already past.
    pub fn expires_in(&self) -> i64 {
        self.exp - Utc::now().timestamp()
    }
}

// =============================================================================
// TokenCodec
// =============================================================================

/// Issues and verifies signed bearer tokens.
#[derive(Clone)]
pub struct TokenCodec {
    config: Arc<TokenConfig>,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl TokenCodec {
    /// Creates a new codec with the given configuration.
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.leeway = config.leeway_secs;
        validation.validate_aud = false;

        Ok(Self {
            config: Arc::new(config),
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Signs the given claims into a token string.
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let header = Header::new(self.config.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Issuance(format!("failed to sign token: {e}")))
    }

    /// Issues a fresh token for a user.
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        let claims =
            TokenClaims::new(user_id, self.config.expiration_secs).with_issuer(&self.config.issuer);

        self.sign(&claims)
    }

    /// Verifies a presented token and returns its claims.
    ///
    /// Expiry is reported as [`TokenError::Expired`]; every other failure
    /// mode (bad signature, bad structure, wrong issuer, wrong algorithm)
    /// collapses into [`TokenError::Malformed`]. An expiry at or before the
    /// current time (past any leeway) counts as expired; the underlying
    /// decoder alone would accept that exact second.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                kind => TokenError::Malformed(format!("{kind:?}")),
            })?;

        if claims.exp <= Utc::now().timestamp() - self.config.leeway_secs as i64 {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Returns the configured token lifetime in seconds.
    pub fn expiration_secs(&self) -> i64 {
        self.config.expiration_secs
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.config.issuer)
            .field("algorithm", &self.config.algorithm)
            .field("expiration_secs", &self.config.expiration_secs)
            .finish()
    }
}

// =============================================================================
// Algorithm Serialization
// =============================================================================

mod algorithm_serde {
    use jsonwebtoken::Algorithm;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(algorithm: &Algorithm, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match algorithm {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::PS256 => "PS256",
            Algorithm::PS384 => "PS384",
            Algorithm::PS512 => "PS512",
            Algorithm::EdDSA => "EdDSA",
        };
        s.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Algorithm, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            "RS256" => Ok(Algorithm::RS256),
            "RS384" => Ok(Algorithm::RS384),
            "RS512" => Ok(Algorithm::RS512),
            "ES256" => Ok(Algorithm::ES256),
            "ES384" => Ok(Algorithm::ES384),
            "PS256" => Ok(Algorithm::PS256),
            "PS384" => Ok(Algorithm::PS384),
            "PS512" => Ok(Algorithm::PS512),
            "EdDSA" => Ok(Algorithm::EdDSA),
            _ => Err(serde::de::Error::custom(format!(
                "unknown algorithm: {}",
                s
            ))),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig::new("test-secret-key-that-is-long-enough-for-testing")
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = TokenCodec::new(test_config()).unwrap();

        let token = codec.issue(42).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.iss.as_deref(), Some("planta"));
        assert!(claims.expires_in() > 0);
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let codec = TokenCodec::new(test_config()).unwrap();

        let claims = TokenClaims::new(42, -3600).with_issuer("planta");
        let token = codec.sign(&claims).unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_expiry_at_current_second_is_expired() {
        let codec = TokenCodec::new(test_config()).unwrap();

        // exp == now exactly; the boundary second is already expired.
        let claims = TokenClaims::new(42, 0).with_issuer("planta");
        let token = codec.sign(&claims).unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let codec = TokenCodec::new(test_config()).unwrap();

        let result = codec.verify("not.a.token");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_wrong_secret_is_malformed_not_expired() {
        let codec1 = TokenCodec::new(TokenConfig::new("secret-one-for-testing-purposes!")).unwrap();
        let codec2 = TokenCodec::new(TokenConfig::new("secret-two-for-testing-purposes!")).unwrap();

        let token = codec1.issue(7).unwrap();

        assert!(matches!(codec2.verify(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let codec = TokenCodec::new(test_config()).unwrap();

        let token = codec.issue(7).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        // Swap the payload for one claiming another user; the signature no
        // longer matches.
        parts[1] = parts[1].replace(|c: char| c == 'a', "b");
        let tampered = parts.join(".");

        assert!(matches!(codec.verify(&tampered), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let other = TokenCodec::new(test_config().with_issuer("otra-app")).unwrap();
        let codec = TokenCodec::new(test_config()).unwrap();

        let token = other.issue(7).unwrap();
        assert!(matches!(codec.verify(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(TokenCodec::new(TokenConfig::default()).is_err());
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = TokenClaims {
            sub: "admin".to_string(),
            exp: 0,
            iat: 0,
            iss: None,
            jti: None,
        };
        assert!(claims.user_id().is_err());
    }
}
