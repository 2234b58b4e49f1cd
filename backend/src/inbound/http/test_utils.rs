//! Shared helpers for HTTP handler tests.

use std::sync::Arc;

use crate::domain::ports::{SessionToken, TokenClaims, TokenIssuer, TokenIssuerError};
use crate::domain::{EmailAddress, UserId};

/// Token issuer that accepts any presented token as the configured claims.
pub struct StaticTokenIssuer {
    claims: TokenClaims,
}

impl StaticTokenIssuer {
    pub fn new(claims: TokenClaims) -> Self {
        Self { claims }
    }
}

impl TokenIssuer for StaticTokenIssuer {
    fn issue(&self, _claims: &TokenClaims) -> Result<SessionToken, TokenIssuerError> {
        Ok(SessionToken::new("test.session.token"))
    }

    fn verify(&self, _token: &str) -> Option<TokenClaims> {
        Some(self.claims.clone())
    }
}

/// Claims for a random test user.
pub fn test_claims(user_id: UserId) -> TokenClaims {
    TokenClaims {
        user_id,
        email: EmailAddress::new("ada@example.com").expect("valid email"),
    }
}

/// Token issuer accepting every token as `user_id`.
pub fn tokens_for(user_id: UserId) -> Arc<dyn TokenIssuer> {
    Arc::new(StaticTokenIssuer::new(test_claims(user_id)))
}
