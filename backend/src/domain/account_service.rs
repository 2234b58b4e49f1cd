//! Account domain service: registration, login, and identity resolution.
//!
//! Login failures are deliberately indistinguishable: unknown email and
//! wrong password both produce the same invalid-credentials error so the
//! endpoint cannot be used to enumerate accounts.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    AccountService, AuthPayload, CredentialHasher, RegisterRequest, TokenClaims, TokenIssuer,
    UserPersistenceError, UserRepository,
};
use crate::domain::{EmailAddress, Error, LoginCredentials, User, UserId};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::duplicate_email(format!("email address is already registered: {email}"))
        }
    }
}

/// Account service backed by a user repository, a credential hasher, and a
/// token issuer.
#[derive(Clone)]
pub struct CoreAccountService<R> {
    users: Arc<R>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl<R> CoreAccountService<R> {
    /// Create a new account service.
    pub fn new(
        users: Arc<R>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }

    fn issue_payload(&self, user: User) -> Result<AuthPayload, Error> {
        let claims = TokenClaims {
            user_id: user.id(),
            email: user.email().clone(),
        };
        let token = self.tokens.issue(&claims).map_err(|err| {
            tracing::error!(error = %err, "session token issuing failed");
            Error::internal("session token could not be issued")
        })?;
        Ok(AuthPayload { token, user })
    }
}

#[async_trait]
impl<R> AccountService for CoreAccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterRequest) -> Result<AuthPayload, Error> {
        let RegisterRequest {
            email,
            password,
            profile,
        } = request;

        let password_hash = self.hasher.hash(&password).map_err(|err| {
            tracing::error!(error = %err, "password hashing failed");
            Error::internal("credentials could not be processed")
        })?;

        let user = User::new(UserId::random(), email, profile, self.clock.utc());
        self.users
            .insert(&user, &password_hash)
            .await
            .map_err(map_repository_error)?;

        tracing::info!(user_id = %user.id(), "account registered");
        self.issue_payload(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthPayload, Error> {
        // Malformed emails cannot match an account, so they fall into the
        // same uniform failure as a wrong password.
        let email = match EmailAddress::new(credentials.email()) {
            Ok(email) => email,
            Err(_) => return Err(Error::invalid_credentials()),
        };

        let Some((user, stored_hash)) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?
        else {
            return Err(Error::invalid_credentials());
        };

        if !self.hasher.verify(credentials.password(), &stored_hash) {
            return Err(Error::invalid_credentials());
        }

        tracing::info!(user_id = %user.id(), "account signed in");
        self.issue_payload(user)
    }

    async fn current_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} does not exist")))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
