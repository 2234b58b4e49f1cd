//! Shared fixtures for unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    EmailAddress, Listing, ListingDraft, ListingDraftParts, ListingId, RentUnit, User, UserId,
    UserProfile,
};

/// Deterministic timestamp all fixtures hang off.
pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock frozen at [`fixture_timestamp`].
pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

/// Clock frozen at an arbitrary instant.
pub(crate) fn fixture_clock_at(utc_now: DateTime<Utc>) -> Arc<dyn Clock> {
    Arc::new(FixtureClock { utc_now })
}

pub(crate) fn sample_profile() -> UserProfile {
    UserProfile::try_from_parts("Ada", "Lovelace", "1 Analytical Way", "555-0100")
        .expect("valid fixture profile")
}

pub(crate) fn sample_user(email: &str) -> User {
    User::new(
        UserId::random(),
        EmailAddress::new(email).expect("valid fixture email"),
        sample_profile(),
        fixture_timestamp(),
    )
}

pub(crate) fn sample_draft() -> ListingDraft {
    ListingDraft::new(ListingDraftParts {
        title: "Camera".to_owned(),
        description: "Mirrorless camera with two lenses".to_owned(),
        categories: vec!["electronics".to_owned()],
        price: 200.0,
        rent_rate: 15.0,
        rent_unit: RentUnit::PerDay,
    })
    .expect("valid fixture draft")
}

pub(crate) fn sample_listing(owner: UserId) -> Listing {
    Listing::new(ListingId::random(), owner, sample_draft(), fixture_timestamp())
}
