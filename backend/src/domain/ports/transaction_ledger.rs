//! Port for the append-only transaction ledger.
//!
//! Recording a booking is the one place where two aggregates must change
//! together, so the atomic pair lives on this port rather than on the
//! listing repository: adapters commit the listing side effect and the
//! ledger insert in a single storage transaction.

use async_trait::async_trait;

use crate::domain::{ListingId, RentalWindow, Transaction, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by transaction ledger adapters.
    pub enum LedgerError {
        /// Ledger connection could not be established.
        Connection { message: String } =>
            "transaction ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "transaction ledger query failed: {message}",
        /// The listing was bought by someone else before this purchase
        /// committed.
        ListingUnavailable { listing_id: String } =>
            "listing {listing_id} is no longer available",
        /// A competing rental claimed an overlapping window before this
        /// rental committed.
        WindowConflict { listing_id: String } =>
            "listing {listing_id} is already rented for an overlapping window",
    }
}

/// Port for recording bookings and reading transaction history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionLedger: Send + Sync {
    /// Atomically mark the listing unavailable and append the purchase
    /// record. Fails with [`LedgerError::ListingUnavailable`] when the
    /// listing was already taken.
    async fn record_purchase(&self, transaction: &Transaction) -> Result<(), LedgerError>;

    /// Atomically re-check the rental window against confirmed rentals and
    /// append the rental record. Fails with [`LedgerError::WindowConflict`]
    /// when a competing booking won the window.
    async fn record_rental(&self, transaction: &Transaction) -> Result<(), LedgerError>;

    /// Transactions where the user is buyer or seller, newest first.
    async fn find_by_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Transaction>, LedgerError>;

    /// Windows of confirmed rentals against a listing, for overlap checks.
    async fn find_active_rental_windows(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<RentalWindow>, LedgerError>;
}

/// Fixture implementation for tests that do not exercise the ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTransactionLedger;

#[async_trait]
impl TransactionLedger for FixtureTransactionLedger {
    async fn record_purchase(&self, _transaction: &Transaction) -> Result<(), LedgerError> {
        Ok(())
    }

    async fn record_rental(&self, _transaction: &Transaction) -> Result<(), LedgerError> {
        Ok(())
    }

    async fn find_by_participant(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Transaction>, LedgerError> {
        Ok(Vec::new())
    }

    async fn find_active_rental_windows(
        &self,
        _listing_id: &ListingId,
    ) -> Result<Vec<RentalWindow>, LedgerError> {
        Ok(Vec::new())
    }
}
