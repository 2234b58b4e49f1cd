//! JWT-backed implementation of the session token port.
//!
//! Tokens are signed with HS256 and carry the user id as the `sub` claim.
//! Issuance timestamps come from the injected clock so expiry is testable;
//! verification fails closed to `None` for any malformed, tampered, or
//! expired token.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SessionToken, TokenClaims, TokenIssuer, TokenIssuerError};
use crate::domain::EmailAddress;

/// Default token lifetime: seven days.
pub const DEFAULT_TOKEN_TTL: chrono::Duration = chrono::Duration::days(7);

/// Registered and private claims carried in the signed payload.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// HS256 session token issuer.
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Create an issuer signing with `secret` and the default lifetime.
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL, clock)
    }

    /// Create an issuer signing with `secret` and a custom lifetime.
    pub fn with_ttl(secret: &str, ttl: chrono::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: a token expired by one second is expired.
        validation.leeway = 0;
        validation
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, claims: &TokenClaims) -> Result<SessionToken, TokenIssuerError> {
        let issued_at = self.clock.utc();
        let payload = JwtClaims {
            sub: claims.user_id.to_string(),
            email: claims.email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &payload, &self.encoding_key)
            .map(SessionToken::new)
            .map_err(|err| TokenIssuerError::encoding(err.to_string()))
    }

    fn verify(&self, token: &str) -> Option<TokenClaims> {
        let decoded =
            jsonwebtoken::decode::<JwtClaims>(token, &self.decoding_key, &Self::validation())
                .ok()?;

        let user_id = decoded.claims.sub.parse().ok()?;
        let email = EmailAddress::new(&decoded.claims.email).ok()?;

        Some(TokenClaims { user_id, email })
    }
}
