//! Account HTTP handlers.
//!
//! ```text
//! POST /api/v1/auth/register
//! POST /api/v1/auth/login
//! GET  /api/v1/auth/me
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AuthPayload, RegisterRequest};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, Password, User, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;

/// Request payload for account registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Password1")]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
}

/// Request payload for signing in.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    pub email: String,
    pub password: String,
}

/// Public account representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            first_name: user.profile().first_name().to_owned(),
            last_name: user.profile().last_name().to_owned(),
            address: user.profile().address().to_owned(),
            phone_number: user.profile().phone_number().to_owned(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Bearer token plus the account it authenticates.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseBody {
    pub token: String,
    pub user: UserBody,
}

impl From<AuthPayload> for AuthResponseBody {
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: payload.token.as_str().to_owned(),
            user: UserBody::from(payload.user),
        }
    }
}

fn parse_register_request(body: RegisterRequestBody) -> Result<RegisterRequest, Error> {
    let email =
        EmailAddress::new(&body.email).map_err(|err| Error::invalid_email(err.to_string()))?;
    let password =
        Password::new(body.password).map_err(|err| Error::weak_password(err.to_string()))?;
    let profile = UserProfile::try_from_parts(
        &body.first_name,
        &body.last_name,
        &body.address,
        &body.phone_number,
    )
    .map_err(|err| Error::invalid_request(err.to_string()))?;

    Ok(RegisterRequest {
        email,
        password,
        profile,
    })
}

/// Register a new account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequestBody,
    responses(
        (status = 200, description = "Account registered", body = AuthResponseBody),
        (status = 400, description = "Invalid registration payload", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequestBody>,
) -> ApiResult<web::Json<AuthResponseBody>> {
    let request = parse_register_request(payload.into_inner())?;
    let auth = state.accounts.register(request).await?;
    Ok(web::Json(AuthResponseBody::from(auth)))
}

/// Authenticate an existing account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Signed in", body = AuthResponseBody),
        (status = 400, description = "Invalid login payload", body = Error),
        (status = 401, description = "Invalid email or password", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<AuthResponseBody>> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.email, &body.password)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let auth = state.accounts.login(credentials).await?;
    Ok(web::Json(AuthResponseBody::from(auth)))
}

/// Resolve the account behind the presented bearer token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Authenticated account", body = UserBody),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["auth"],
    operation_id = "me",
    security(("BearerToken" = []))
)]
#[get("/auth/me")]
pub async fn me(state: web::Data<HttpState>, identity: Identity) -> ApiResult<web::Json<UserBody>> {
    let claims = identity.require()?;
    let user = state.accounts.current_user(claims.user_id).await?;
    Ok(web::Json(UserBody::from(user)))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
