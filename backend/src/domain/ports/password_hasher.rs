//! Port for credential hashing adapters.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing credential material.
    pub enum PasswordHashError {
        /// The hashing backend rejected the input or failed internally.
        Hashing { message: String } =>
            "password could not be hashed: {message}",
    }
}

/// Port for one-way password hashing and verification.
///
/// Verification is infallible by design: a hash that cannot be parsed is
/// treated the same as a wrong password.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Derive a storable hash from a raw password.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Check a presented password against a stored hash.
    fn verify(&self, candidate: &str, hash: &PasswordHash) -> bool;
}

/// Fixture implementation for tests that do not exercise credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentialHasher;

impl CredentialHasher for FixtureCredentialHasher {
    fn hash(&self, _password: &Password) -> Result<PasswordHash, PasswordHashError> {
        Err(PasswordHashError::hashing("credential hasher not configured"))
    }

    fn verify(&self, _candidate: &str, _hash: &PasswordHash) -> bool {
        false
    }
}
