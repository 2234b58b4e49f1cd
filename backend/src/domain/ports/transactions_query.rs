//! Driving port for reading transaction history.

use async_trait::async_trait;

use crate::domain::{Error, Transaction, UserId};

/// Driving port for a user's transaction history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionQuery: Send + Sync {
    /// Transactions where the user is buyer or seller, newest first.
    async fn list_for_participant(&self, user_id: UserId) -> Result<Vec<Transaction>, Error>;
}

/// Fixture implementation for tests that do not read history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTransactionQuery;

#[async_trait]
impl TransactionQuery for FixtureTransactionQuery {
    async fn list_for_participant(&self, _user_id: UserId) -> Result<Vec<Transaction>, Error> {
        Ok(Vec::new())
    }
}
