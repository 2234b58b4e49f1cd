//! Port for user account persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, PasswordHash, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// Another account already holds this email address.
        DuplicateEmail { email: String } =>
            "email address is already registered: {email}",
    }
}

/// Port for storing accounts and resolving them for authentication.
///
/// Password hashes travel alongside the user on insert and email lookup so
/// credential material never lives on the [`User`] entity itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account with its credential hash.
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError>;

    /// Fetch an account and its credential hash by registered email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(
        &self,
        _user: &User,
        _password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_lookups_return_none() {
        let repo = FixtureUserRepository;
        let by_email = repo
            .find_by_email(&EmailAddress::new("nobody@example.com").expect("valid email"))
            .await
            .expect("fixture lookup succeeds");
        assert!(by_email.is_none());

        let by_id = repo
            .find_by_id(&UserId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(by_id.is_none());
    }

    #[rstest]
    fn duplicate_email_error_carries_the_address() {
        let err = UserPersistenceError::duplicate_email("taken@example.com");
        assert!(err.to_string().contains("taken@example.com"));
    }
}
