//! Domain layer: entities, value types, services, and hexagonal ports.
//!
//! Nothing in this module touches HTTP or the database. Inbound adapters
//! translate requests into these types and driving-port calls; outbound
//! adapters implement the driven ports against real infrastructure.

mod account_service;
mod booking_service;
mod credentials;
mod error;
mod ledger_service;
mod listing;
mod listing_service;
pub mod ports;
mod transaction;
mod user;

pub use account_service::CoreAccountService;
pub use booking_service::BookingEngine;
pub use credentials::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN, Password, PasswordPolicyError,
};
pub use error::{Error, ErrorCode, ErrorValidationError};
pub use ledger_service::LedgerQueryService;
pub use listing::{
    Listing, ListingDraft, ListingDraftParts, ListingId, ListingValidationError, RentUnit,
};
pub use listing_service::{ListingCommandService, ListingQueryService};
pub use transaction::{
    RentalWindow, RentalWindowError, Transaction, TransactionId, TransactionKind,
    TransactionStatus, rental_price,
};
pub use user::{EmailAddress, PasswordHash, User, UserId, UserProfile, UserValidationError};
