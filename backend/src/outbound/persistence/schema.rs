//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered users with their credentials and contact details.
    /// The `email` column carries a unique constraint; addresses are stored
    /// lowercased so uniqueness is case-insensitive.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Normalised (lowercased) email address, unique.
        email -> Varchar,
        /// Encoded Argon2 password hash.
        password_hash -> Varchar,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Postal address.
        address -> Varchar,
        /// Contact phone number.
        phone_number -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Marketplace listings table.
    ///
    /// One row per posted product. `is_available` is flipped to false by the
    /// booking engine's purchase path, never by listing updates.
    listings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user, references `users.id`.
        owner_id -> Uuid,
        /// Listing headline.
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Category tags.
        categories -> Array<Text>,
        /// Sale price.
        price -> Float8,
        /// Rental rate in `rent_unit` units.
        rent_rate -> Float8,
        /// Rental billing unit token (`PER_HOUR` or `PER_DAY`).
        rent_unit -> Varchar,
        /// Whether a purchase may still be made.
        is_available -> Bool,
        /// Ad-hoc view counter.
        views -> Int4,
        /// Timestamp the listing was first posted.
        posted_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only transaction ledger table.
    ///
    /// Records agreed purchases and rentals. Rental rows carry the booked
    /// window in `rent_start`/`rent_end`; purchase rows leave both null.
    transactions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Transaction kind token (`PURCHASE` or `RENT`).
        kind -> Varchar,
        /// Booked listing, references `listings.id`.
        listing_id -> Uuid,
        /// Paying party, references `users.id`.
        buyer_id -> Uuid,
        /// Listing owner at booking time, references `users.id`.
        seller_id -> Uuid,
        /// Agreed price.
        price -> Float8,
        /// Rental window start; null for purchases.
        rent_start -> Nullable<Timestamptz>,
        /// Rental window end; null for purchases.
        rent_end -> Nullable<Timestamptz>,
        /// Lifecycle status token.
        status -> Varchar,
        /// Timestamp the booking was recorded.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, listings, transactions);
