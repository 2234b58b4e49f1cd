//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! Adapters stay thin: they translate between Diesel rows and domain types
//! and map database failures onto port error types. Row structs and schema
//! definitions are internal and never leak into the domain layer. The one
//! deliberate exception to thinness is the transaction ledger, which owns
//! the storage transactions that make bookings race-safe.

mod diesel_listing_repository;
mod diesel_transaction_ledger;
mod diesel_user_repository;
pub(crate) mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_listing_repository::DieselListingRepository;
pub use diesel_transaction_ledger::DieselTransactionLedger;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
