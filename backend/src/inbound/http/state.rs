//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, BookingCommand, FixtureAccountService, FixtureBookingCommand,
    FixtureListingCommand, FixtureListingQuery, FixtureTokenIssuer, FixtureTransactionQuery,
    ListingCommand, ListingQuery, TokenIssuer, TransactionQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub listing_commands: Arc<dyn ListingCommand>,
    pub listing_queries: Arc<dyn ListingQuery>,
    pub bookings: Arc<dyn BookingCommand>,
    pub transactions: Arc<dyn TransactionQuery>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl HttpState {
    /// State wired entirely to fixture ports: every read is empty, every
    /// command reports service unavailable, and no token verifies.
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            accounts: Arc::new(FixtureAccountService),
            listing_commands: Arc::new(FixtureListingCommand),
            listing_queries: Arc::new(FixtureListingQuery),
            bookings: Arc::new(FixtureBookingCommand),
            transactions: Arc::new(FixtureTransactionQuery),
            tokens: Arc::new(FixtureTokenIssuer),
        }
    }
}
