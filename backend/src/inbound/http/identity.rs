//! Bearer-token identity extractor.
//!
//! Extraction never fails: a missing, malformed, or expired token yields an
//! anonymous identity, and handlers that need authentication call
//! [`Identity::require`]. This keeps public endpoints and protected
//! endpoints on the same extractor.

use std::future::{Ready, ready};

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use crate::domain::Error;
use crate::domain::ports::TokenClaims;
use crate::inbound::http::state::HttpState;

/// The identity presented with a request, if any.
#[derive(Debug, Clone)]
pub struct Identity(Option<TokenClaims>);

impl Identity {
    /// Build an identity directly from optional claims.
    #[must_use]
    pub fn from_claims(claims: Option<TokenClaims>) -> Self {
        Self(claims)
    }

    /// Claims of the authenticated caller, or an error for anonymous
    /// requests.
    pub fn require(&self) -> Result<TokenClaims, Error> {
        self.0
            .clone()
            .ok_or_else(|| Error::not_authenticated("a valid bearer token is required"))
    }

    /// Whether the request carried a verified token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.app_data::<web::Data<HttpState>>().and_then(|state| {
            bearer_token(req).and_then(|token| state.tokens.verify(token))
        });
        ready(Ok(Self(claims)))
    }
}
