//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account;
mod booking;
mod listing_ops;
mod listing_repository;
mod password_hasher;
mod token_issuer;
mod transaction_ledger;
mod transactions_query;
mod user_repository;

#[cfg(test)]
pub use account::MockAccountService;
pub use account::{AccountService, AuthPayload, FixtureAccountService, RegisterRequest};
#[cfg(test)]
pub use booking::MockBookingCommand;
pub use booking::{BookingCommand, FixtureBookingCommand, RentRequest};
#[cfg(test)]
pub use listing_ops::{MockListingCommand, MockListingQuery};
pub use listing_ops::{FixtureListingCommand, FixtureListingQuery, ListingCommand, ListingQuery};
#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{FixtureListingRepository, ListingPersistenceError, ListingRepository};
#[cfg(test)]
pub use password_hasher::MockCredentialHasher;
pub use password_hasher::{CredentialHasher, FixtureCredentialHasher, PasswordHashError};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{
    FixtureTokenIssuer, SessionToken, TokenClaims, TokenIssuer, TokenIssuerError,
};
#[cfg(test)]
pub use transaction_ledger::MockTransactionLedger;
pub use transaction_ledger::{FixtureTransactionLedger, LedgerError, TransactionLedger};
#[cfg(test)]
pub use transactions_query::MockTransactionQuery;
pub use transactions_query::{FixtureTransactionQuery, TransactionQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
