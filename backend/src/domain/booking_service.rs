//! Booking engine: purchases and rental reservations.
//!
//! The engine validates a booking against a snapshot of the listing and the
//! pending-or-confirmed rental calendar, then hands the record to the ledger
//! port, whose adapters re-check the contested condition inside a storage
//! transaction. A purchase lost to a concurrent buyer surfaces as
//! unavailable; a rental window lost to a concurrent renter surfaces as an
//! overlap conflict.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    BookingCommand, LedgerError, ListingPersistenceError, ListingRepository, RentRequest,
    TransactionLedger,
};
use crate::domain::{
    Error, Listing, ListingId, RentalWindow, Transaction, TransactionId, UserId, rental_price,
};

fn map_listing_error(error: ListingPersistenceError) -> Error {
    match error {
        ListingPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("listing repository unavailable: {message}"))
        }
        ListingPersistenceError::Query { message } => {
            Error::internal(format!("listing repository error: {message}"))
        }
    }
}

fn map_ledger_error(error: LedgerError) -> Error {
    match error {
        LedgerError::Connection { message } => {
            Error::service_unavailable(format!("transaction ledger unavailable: {message}"))
        }
        LedgerError::Query { message } => {
            Error::internal(format!("transaction ledger error: {message}"))
        }
        LedgerError::ListingUnavailable { listing_id } => {
            Error::unavailable(format!("listing {listing_id} is no longer available"))
        }
        LedgerError::WindowConflict { listing_id } => Error::overlap_conflict(format!(
            "listing {listing_id} is already rented for the selected dates"
        )),
    }
}

/// Booking engine backed by the listing repository and the ledger.
#[derive(Clone)]
pub struct BookingEngine<L, T> {
    listings: Arc<L>,
    ledger: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<L, T> BookingEngine<L, T> {
    /// Create a new booking engine.
    pub fn new(listings: Arc<L>, ledger: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            listings,
            ledger,
            clock,
        }
    }
}

impl<L, T> BookingEngine<L, T>
where
    L: ListingRepository,
    T: TransactionLedger,
{
    /// Load the listing and reject bookings against one's own posting.
    async fn find_counterparty_listing(
        &self,
        buyer: UserId,
        listing_id: ListingId,
    ) -> Result<Listing, Error> {
        let listing = self
            .listings
            .find_by_id(&listing_id)
            .await
            .map_err(map_listing_error)?
            .ok_or_else(|| Error::not_found(format!("listing {listing_id} does not exist")))?;
        if listing.owner() == buyer {
            return Err(Error::self_transaction(
                "you cannot buy or rent your own listing",
            ));
        }
        Ok(listing)
    }
}

#[async_trait]
impl<L, T> BookingCommand for BookingEngine<L, T>
where
    L: ListingRepository,
    T: TransactionLedger,
{
    async fn buy(&self, buyer: UserId, listing_id: ListingId) -> Result<Transaction, Error> {
        let listing = self.find_counterparty_listing(buyer, listing_id).await?;
        if !listing.is_available() {
            return Err(Error::unavailable(format!(
                "listing {listing_id} is no longer available"
            )));
        }

        let transaction =
            Transaction::purchase(TransactionId::random(), &listing, buyer, self.clock.utc());
        self.ledger
            .record_purchase(&transaction)
            .await
            .map_err(map_ledger_error)?;

        tracing::info!(
            transaction_id = %transaction.id(),
            listing_id = %listing_id,
            buyer = %buyer,
            "purchase recorded"
        );
        Ok(transaction)
    }

    async fn rent(
        &self,
        buyer: UserId,
        listing_id: ListingId,
        request: RentRequest,
    ) -> Result<Transaction, Error> {
        let listing = self.find_counterparty_listing(buyer, listing_id).await?;
        if !listing.is_available() {
            return Err(Error::unavailable(format!(
                "listing {listing_id} is no longer available"
            )));
        }

        let window = RentalWindow::new(request.start, request.end)
            .map_err(|_| Error::invalid_window("rental start must be before rental end"))?;
        let now = self.clock.utc();
        if window.start() < now {
            return Err(Error::past_start("rental start must not be in the past"));
        }

        let booked = self
            .ledger
            .find_active_rental_windows(&listing_id)
            .await
            .map_err(map_ledger_error)?;
        if booked.iter().any(|existing| window.overlaps(existing)) {
            return Err(Error::overlap_conflict(format!(
                "listing {listing_id} is already rented for the selected dates"
            )));
        }

        let price = rental_price(
            listing.draft().rent_rate(),
            listing.draft().rent_unit(),
            &window,
        );
        let transaction = Transaction::rental(
            TransactionId::random(),
            &listing,
            buyer,
            window,
            price,
            now,
        );
        self.ledger
            .record_rental(&transaction)
            .await
            .map_err(map_ledger_error)?;

        tracing::info!(
            transaction_id = %transaction.id(),
            listing_id = %listing_id,
            buyer = %buyer,
            "rental recorded"
        );
        Ok(transaction)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
