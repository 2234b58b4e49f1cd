//! Port for issuing and verifying session tokens.

use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised when a token cannot be produced.
    pub enum TokenIssuerError {
        /// Signing or serialising the token failed.
        Encoding { message: String } =>
            "session token could not be issued: {message}",
    }
}

/// Opaque signed session token handed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token string.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Identity claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Account the token authenticates.
    pub user_id: UserId,
    /// Email registered to the account when the token was issued.
    pub email: EmailAddress,
}

/// Port for session token adapters.
///
/// Verification fails closed: any malformed, tampered, or expired token
/// yields `None` with no distinction between the failure modes.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for the given claims.
    fn issue(&self, claims: &TokenClaims) -> Result<SessionToken, TokenIssuerError>;

    /// Decode and verify a presented token.
    fn verify(&self, token: &str) -> Option<TokenClaims>;
}

/// Fixture implementation for tests that do not exercise authentication.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenIssuer;

impl TokenIssuer for FixtureTokenIssuer {
    fn issue(&self, _claims: &TokenClaims) -> Result<SessionToken, TokenIssuerError> {
        Err(TokenIssuerError::encoding("token issuer not configured"))
    }

    fn verify(&self, _token: &str) -> Option<TokenClaims> {
        None
    }
}
