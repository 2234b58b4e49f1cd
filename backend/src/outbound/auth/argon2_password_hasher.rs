//! Argon2id implementation of the credential hashing port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as ParsedHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

use crate::domain::ports::{CredentialHasher, PasswordHashError};
use crate::domain::{Password, PasswordHash};

/// Argon2id hasher with the library's recommended default parameters.
#[derive(Default)]
pub struct Argon2CredentialHasher {
    argon: Argon2<'static>,
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| PasswordHash::from_encoded(hash.to_string()))
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> bool {
        // An unparseable stored hash verifies as a plain mismatch.
        ParsedHash::new(hash.as_str())
            .map(|parsed| {
                self.argon
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
