//! Transaction history query service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LedgerError, TransactionLedger, TransactionQuery};
use crate::domain::{Error, Transaction, UserId};

fn map_ledger_error(error: LedgerError) -> Error {
    match error {
        LedgerError::Connection { message } => {
            Error::service_unavailable(format!("transaction ledger unavailable: {message}"))
        }
        // Booking conflicts cannot arise from reads.
        LedgerError::Query { message }
        | LedgerError::ListingUnavailable { listing_id: message }
        | LedgerError::WindowConflict { listing_id: message } => {
            Error::internal(format!("transaction ledger error: {message}"))
        }
    }
}

/// History service implementing the transaction query driving port.
#[derive(Clone)]
pub struct LedgerQueryService<T> {
    ledger: Arc<T>,
}

impl<T> LedgerQueryService<T> {
    /// Create a new history service.
    pub fn new(ledger: Arc<T>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl<T> TransactionQuery for LedgerQueryService<T>
where
    T: TransactionLedger,
{
    async fn list_for_participant(&self, user_id: UserId) -> Result<Vec<Transaction>, Error> {
        self.ledger
            .find_by_participant(&user_id)
            .await
            .map_err(map_ledger_error)
    }
}
