//! Driving port for account registration and authentication.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, LoginCredentials, Password, User, UserId, UserProfile};

use super::token_issuer::SessionToken;

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Normalised email address to register under.
    pub email: EmailAddress,
    /// Policy-checked raw password.
    pub password: Password,
    /// Name and contact details.
    pub profile: UserProfile,
}

/// Session token plus the account it authenticates.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    /// Signed bearer token for subsequent requests.
    pub token: SessionToken,
    /// The registered or authenticated account.
    pub user: User,
}

/// Driving port for the account service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account and sign it in.
    async fn register(&self, request: RegisterRequest) -> Result<AuthPayload, Error>;

    /// Authenticate an existing account.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthPayload, Error>;

    /// Resolve the account behind an authenticated identity.
    async fn current_user(&self, user_id: UserId) -> Result<User, Error>;
}

/// Fixture implementation for tests that do not exercise accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountService;

#[async_trait]
impl AccountService for FixtureAccountService {
    async fn register(&self, _request: RegisterRequest) -> Result<AuthPayload, Error> {
        Err(Error::service_unavailable("account service not configured"))
    }

    async fn login(&self, _credentials: LoginCredentials) -> Result<AuthPayload, Error> {
        Err(Error::service_unavailable("account service not configured"))
    }

    async fn current_user(&self, _user_id: UserId) -> Result<User, Error> {
        Err(Error::service_unavailable("account service not configured"))
    }
}
