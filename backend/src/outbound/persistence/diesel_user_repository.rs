//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Emails are stored lowercased, so lookups match the domain's
//! case-insensitive uniqueness rule without extra SQL functions.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, PasswordHash, User, UserId, UserProfile};

use super::error_mapping::{is_unique_violation, map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain user and stored hash.
fn row_to_user(row: UserRow) -> Result<(User, PasswordHash), UserPersistenceError> {
    let UserRow {
        id,
        email,
        password_hash,
        first_name,
        last_name,
        address,
        phone_number,
        created_at,
    } = row;

    let email = EmailAddress::new(&email)
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let profile = UserProfile::try_from_parts(&first_name, &last_name, &address, &phone_number)
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;

    Ok((
        User::new(UserId::from_uuid(id), email, profile, created_at),
        PasswordHash::from_encoded(password_hash),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_str(),
            password_hash: password_hash.as_str(),
            first_name: user.profile().first_name(),
            last_name: user.profile().last_name(),
            address: user.profile().address(),
            phone_number: user.profile().phone_number(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_email(user.email().to_string())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| row_to_user(row).map(|(user, _)| user))
            .transpose()
    }
}
