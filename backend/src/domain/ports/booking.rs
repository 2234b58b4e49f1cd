//! Driving port for the booking engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, ListingId, Transaction, UserId};

/// Raw rental request. The window is validated by the booking engine so
/// callers get domain errors rather than parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentRequest {
    /// Requested rental start.
    pub start: DateTime<Utc>,
    /// Requested rental end.
    pub end: DateTime<Utc>,
}

/// Driving port for purchases and rentals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Buy a listing outright, taking it off the market.
    async fn buy(&self, buyer: UserId, listing_id: ListingId) -> Result<Transaction, Error>;

    /// Rent a listing over the requested window.
    async fn rent(
        &self,
        buyer: UserId,
        listing_id: ListingId,
        request: RentRequest,
    ) -> Result<Transaction, Error>;
}

/// Fixture implementation for tests that do not book anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingCommand;

#[async_trait]
impl BookingCommand for FixtureBookingCommand {
    async fn buy(&self, _buyer: UserId, _listing_id: ListingId) -> Result<Transaction, Error> {
        Err(Error::service_unavailable("booking engine not configured"))
    }

    async fn rent(
        &self,
        _buyer: UserId,
        _listing_id: ListingId,
        _request: RentRequest,
    ) -> Result<Transaction, Error> {
        Err(Error::service_unavailable("booking engine not configured"))
    }
}
