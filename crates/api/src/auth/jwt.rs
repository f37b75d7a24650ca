//! Session-token issuing and verification.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. They embed no
//! expiry: a token stays usable exactly as long as it is present in its
//! owner's stored session list, so verification here is only half of the
//! check (see [`crate::auth::credentials`]).

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use todo_core::session::SessionKind;
use todo_core::types::DbId;
use uuid::Uuid;

use crate::config::ConfigError;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: DbId,
    /// What the session grants.
    pub kind: SessionKind,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier, so two tokens for the same user never collide.
    pub jti: String,
}

/// Identity recovered from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: DbId,
    pub kind: SessionKind,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Malformed, wrongly signed, or missing required claims.
    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Configuration for session-token signing.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from the environment.
    ///
    /// | Env Var      | Required | Default |
    /// |--------------|----------|---------|
    /// | `JWT_SECRET` | **yes**  | --      |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if secret.is_empty() {
            return Err(ConfigError::Invalid {
                var: "JWT_SECRET",
                reason: "must not be empty".into(),
            });
        }
        Ok(Self { secret })
    }
}

/// Signs and verifies session tokens with a secret fixed at construction.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub"]);

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Mint a signed token for `user_id`.
    pub fn issue(&self, user_id: DbId, kind: SessionKind) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id,
            kind,
            iat: chrono::Utc::now().timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Check the signature and claim shape, returning the embedded identity.
    ///
    /// Says nothing about whether the session is still live.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(TokenError::Invalid)?;
        Ok(VerifiedToken {
            user_id: data.claims.sub,
            kind: data.claims.kind,
        })
    }
}
