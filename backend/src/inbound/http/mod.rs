//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod bookings;
pub mod error;
pub mod health;
pub mod identity;
pub mod listings;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transactions;
pub mod validation;

pub use error::ApiResult;
