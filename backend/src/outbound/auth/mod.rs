//! Authentication adapters: JWT session tokens and Argon2 password hashing.

mod argon2_password_hasher;
mod jwt_token_issuer;

pub use argon2_password_hasher::Argon2CredentialHasher;
pub use jwt_token_issuer::{DEFAULT_TOKEN_TTL, JwtTokenIssuer};
