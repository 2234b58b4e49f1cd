//! Marketplace listing aggregate.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::UserId;

/// Validation errors for listing drafts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListingValidationError {
    /// Title was blank after trimming.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Sale price was negative or not finite.
    #[error("price must be a non-negative number")]
    InvalidPrice,
    /// Rental rate was negative or not finite.
    #[error("rent rate must be a non-negative number")]
    InvalidRentRate,
    /// A category tag was blank after trimming.
    #[error("categories must not contain empty entries")]
    EmptyCategory,
}

/// Stable listing identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
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

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unit the rental rate is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentUnit {
    /// Rate applies per hour, billed on the exact fractional duration.
    PerHour,
    /// Rate applies per day, billed on whole days rounded up.
    PerDay,
}

impl RentUnit {
    /// Wire/storage token for the unit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerHour => "PER_HOUR",
            Self::PerDay => "PER_DAY",
        }
    }
}

impl fmt::Display for RentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentUnit {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PER_HOUR" => Ok(Self::PerHour),
            "PER_DAY" => Ok(Self::PerDay),
            other => Err(format!("unknown rent unit: {other}")),
        }
    }
}

/// Validated mutable fields of a listing, used for both create and update
/// (updates replace all mutable fields, as the reference API does).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    title: String,
    description: String,
    categories: Vec<String>,
    price: f64,
    rent_rate: f64,
    rent_unit: RentUnit,
}

/// Raw draft fields prior to validation.
#[derive(Debug, Clone)]
pub struct ListingDraftParts {
    /// Listing headline.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Category tags.
    pub categories: Vec<String>,
    /// Sale price.
    pub price: f64,
    /// Rental rate in `rent_unit` units.
    pub rent_rate: f64,
    /// Unit the rental rate is quoted in.
    pub rent_unit: RentUnit,
}

fn validate_money(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl ListingDraft {
    /// Validate and construct a draft.
    pub fn new(parts: ListingDraftParts) -> Result<Self, ListingValidationError> {
        let ListingDraftParts {
            title,
            description,
            categories,
            price,
            rent_rate,
            rent_unit,
        } = parts;

        let title = title.trim().to_owned();
        if title.is_empty() {
            return Err(ListingValidationError::EmptyTitle);
        }
        if !validate_money(price) {
            return Err(ListingValidationError::InvalidPrice);
        }
        if !validate_money(rent_rate) {
            return Err(ListingValidationError::InvalidRentRate);
        }
        let categories = categories
            .into_iter()
            .map(|category| {
                let trimmed = category.trim().to_owned();
                if trimmed.is_empty() {
                    Err(ListingValidationError::EmptyCategory)
                } else {
                    Ok(trimmed)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title,
            description,
            categories,
            price,
            rent_rate,
            rent_unit,
        })
    }

    /// Listing headline.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Category tags.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Sale price.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Rental rate in [`Self::rent_unit`] units.
    #[must_use]
    pub fn rent_rate(&self) -> f64 {
        self.rent_rate
    }

    /// Unit the rental rate is quoted in.
    #[must_use]
    pub fn rent_unit(&self) -> RentUnit {
        self.rent_unit
    }
}

/// A product offered for sale and/or rent.
///
/// ## Invariants
/// - `owner` never changes after creation.
/// - `is_available` is flipped to `false` exclusively by the booking engine
///   when a purchase commits; rentals leave it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    id: ListingId,
    owner: UserId,
    draft: ListingDraft,
    is_available: bool,
    views: i32,
    posted_at: DateTime<Utc>,
}

impl Listing {
    /// Create a fresh listing: available, zero views, posted now.
    #[must_use]
    pub fn new(id: ListingId, owner: UserId, draft: ListingDraft, posted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            draft,
            is_available: true,
            views: 0,
            posted_at,
        }
    }

    /// Reassemble a listing from persisted state.
    #[must_use]
    pub fn from_parts(
        id: ListingId,
        owner: UserId,
        draft: ListingDraft,
        is_available: bool,
        views: i32,
        posted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            draft,
            is_available,
            views,
            posted_at,
        }
    }

    /// Replace the mutable fields with a new draft.
    pub fn apply_draft(&mut self, draft: ListingDraft) {
        self.draft = draft;
    }

    /// Reflect one recorded view on this in-memory copy.
    pub fn record_view(&mut self) {
        self.views = self.views.saturating_add(1);
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> ListingId {
        self.id
    }

    /// Owning user; immutable after creation.
    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Mutable listing fields.
    #[must_use]
    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    /// Whether a purchase may still be made.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Ad-hoc view counter; not atomicity-guaranteed.
    #[must_use]
    pub fn views(&self) -> i32 {
        self.views
    }

    /// Timestamp the listing was first posted.
    #[must_use]
    pub fn posted_at(&self) -> DateTime<Utc> {
        self.posted_at
    }
}
