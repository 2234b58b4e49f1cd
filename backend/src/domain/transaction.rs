//! Transaction records and rental window arithmetic.
//!
//! A transaction is an immutable record of a completed purchase or rental
//! agreement, created exclusively by the booking engine and never deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Listing, ListingId, RentUnit, UserId};

const SECONDS_PER_HOUR: f64 = 3600.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Stable transaction identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether the agreement transfers ownership or grants temporary use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// One-off sale; flips the listing's availability.
    Purchase,
    /// Time-bounded rental; leaves availability untouched.
    #[serde(rename = "RENT")]
    Rental,
}

impl TransactionKind {
    /// Wire/storage token for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "PURCHASE",
            Self::Rental => "RENT",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PURCHASE" => Ok(Self::Purchase),
            "RENT" => Ok(Self::Rental),
            other => Err(format!("unknown transaction kind: {other}")),
        }
    }
}

/// Lifecycle status of a transaction. Immutable in this scope: the booking
/// engine records transactions as `Confirmed` and no cancellation flow
/// exists, but the full status set is retained for historical records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Awaiting confirmation. Already holds its rental window.
    Pending,
    /// Agreed and binding. Counts against rental overlap checks.
    Confirmed,
    /// Fulfilled.
    Completed,
    /// Withdrawn; ignored by overlap checks.
    Cancelled,
}

impl TransactionStatus {
    /// Wire/storage token for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("unknown transaction status: {other}")),
        }
    }
}

/// Validation error for rental windows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RentalWindowError {
    /// `start` was not strictly before `end`.
    #[error("rental start must be before rental end")]
    Inverted,
}

/// A closed rental interval `[start, end]`.
///
/// ## Invariants
/// - `start < end`.
/// - Overlap is inclusive: windows sharing a single instant conflict, so a
///   rental ending at 09:00 blocks another starting at 09:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl RentalWindow {
    /// Validate and construct a window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, RentalWindowError> {
        if start >= end {
            return Err(RentalWindowError::Inverted);
        }
        Ok(Self { start, end })
    }

    /// Window start.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive overlap test: true when the windows share any instant,
    /// including touching endpoints.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Duration of the window in exact fractional hours.
    #[must_use]
    pub fn hours(&self) -> f64 {
        let seconds = (self.end - self.start).num_seconds();
        #[expect(clippy::cast_precision_loss, reason = "rental spans are far below 2^52 seconds")]
        let seconds = seconds as f64;
        seconds / SECONDS_PER_HOUR
    }
}

/// Price for renting at `rate` per `unit` over `window`.
///
/// Hourly rates bill the exact fractional duration with no rounding; daily
/// rates bill whole days rounded up. The asymmetry is deliberate and matches
/// the reference system's billing.
#[must_use]
pub fn rental_price(rate: f64, unit: RentUnit, window: &RentalWindow) -> f64 {
    let hours = window.hours();
    match unit {
        RentUnit::PerHour => rate * hours,
        RentUnit::PerDay => rate * (hours / HOURS_PER_DAY).ceil(),
    }
}

/// Immutable record of an agreed purchase or rental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    kind: TransactionKind,
    listing_id: ListingId,
    buyer: UserId,
    seller: UserId,
    price: f64,
    window: Option<RentalWindow>,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Record a confirmed purchase of `listing` at its sale price.
    #[must_use]
    pub fn purchase(
        id: TransactionId,
        listing: &Listing,
        buyer: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: TransactionKind::Purchase,
            listing_id: listing.id(),
            buyer,
            seller: listing.owner(),
            price: listing.draft().price(),
            window: None,
            status: TransactionStatus::Confirmed,
            created_at,
        }
    }

    /// Record a confirmed rental of `listing` over `window` at the already
    /// computed `price`.
    #[must_use]
    pub fn rental(
        id: TransactionId,
        listing: &Listing,
        buyer: UserId,
        window: RentalWindow,
        price: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: TransactionKind::Rental,
            listing_id: listing.id(),
            buyer,
            seller: listing.owner(),
            price,
            window: Some(window),
            status: TransactionStatus::Confirmed,
            created_at,
        }
    }

    /// Reassemble a transaction from persisted state.
    #[must_use]
    #[expect(clippy::too_many_arguments, reason = "flat persistence row shape")]
    pub fn from_parts(
        id: TransactionId,
        kind: TransactionKind,
        listing_id: ListingId,
        buyer: UserId,
        seller: UserId,
        price: f64,
        window: Option<RentalWindow>,
        status: TransactionStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            listing_id,
            buyer,
            seller,
            price,
            window,
            status,
            created_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Purchase or rental.
    #[must_use]
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Listing this transaction was booked against.
    #[must_use]
    pub fn listing_id(&self) -> ListingId {
        self.listing_id
    }

    /// Paying party.
    #[must_use]
    pub fn buyer(&self) -> UserId {
        self.buyer
    }

    /// Listing owner at booking time.
    #[must_use]
    pub fn seller(&self) -> UserId {
        self.seller
    }

    /// Agreed price.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Rental window; present only for rentals.
    #[must_use]
    pub fn window(&self) -> Option<&RentalWindow> {
        self.window.as_ref()
    }

    /// Lifecycle status.
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Booking timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
