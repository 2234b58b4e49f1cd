//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{listings, transactions, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Listing models
// ---------------------------------------------------------------------------

/// Row struct for reading from the listings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListingRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub price: f64,
    pub rent_rate: f64,
    pub rent_unit: String,
    pub is_available: bool,
    pub views: i32,
    pub posted_at: DateTime<Utc>,
}

/// Insertable struct for creating new listing records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = listings)]
pub(crate) struct NewListingRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub categories: &'a [String],
    pub price: f64,
    pub rent_rate: f64,
    pub rent_unit: &'a str,
    pub is_available: bool,
    pub views: i32,
    pub posted_at: DateTime<Utc>,
}

/// Changeset struct for replacing a listing's mutable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = listings)]
pub(crate) struct ListingUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub categories: &'a [String],
    pub price: f64,
    pub rent_rate: f64,
    pub rent_unit: &'a str,
}

// ---------------------------------------------------------------------------
// Transaction models
// ---------------------------------------------------------------------------

/// Row struct for reading from the transactions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransactionRow {
    pub id: Uuid,
    pub kind: String,
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub price: f64,
    pub rent_start: Option<DateTime<Utc>>,
    pub rent_end: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for appending ledger records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transactions)]
pub(crate) struct NewTransactionRow<'a> {
    pub id: Uuid,
    pub kind: &'a str,
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub price: f64,
    pub rent_start: Option<DateTime<Utc>>,
    pub rent_end: Option<DateTime<Utc>>,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}
