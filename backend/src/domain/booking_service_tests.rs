//! Regression coverage for the booking engine.

use std::sync::Arc;

use chrono::Duration;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockListingRepository, MockTransactionLedger};
use crate::domain::{ErrorCode, ListingDraft, ListingDraftParts, RentUnit, TransactionKind};
use crate::test_support::{fixture_clock, fixture_timestamp, sample_listing};

fn engine(
    listings: MockListingRepository,
    ledger: MockTransactionLedger,
) -> BookingEngine<MockListingRepository, MockTransactionLedger> {
    BookingEngine::new(Arc::new(listings), Arc::new(ledger), fixture_clock())
}

fn listings_returning(stored: Listing) -> MockListingRepository {
    let mut listings = MockListingRepository::new();
    listings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    listings
}

fn rent_request(offset_hours: i64, length_hours: i64) -> RentRequest {
    let start = fixture_timestamp() + Duration::hours(offset_hours);
    RentRequest {
        start,
        end: start + Duration::hours(length_hours),
    }
}

#[rstest]
#[tokio::test]
async fn buy_records_a_confirmed_purchase_at_the_sale_price() {
    let seller = UserId::random();
    let buyer = UserId::random();
    let stored = sample_listing(seller);
    let id = stored.id();

    let mut ledger = MockTransactionLedger::new();
    ledger
        .expect_record_purchase()
        .withf(move |txn| {
            txn.kind() == TransactionKind::Purchase
                && txn.listing_id() == id
                && txn.window().is_none()
        })
        .once()
        .returning(|_| Ok(()));

    let transaction = engine(listings_returning(stored), ledger)
        .buy(buyer, id)
        .await
        .expect("purchase succeeds");

    assert_eq!(transaction.buyer(), buyer);
    assert_eq!(transaction.seller(), seller);
    assert!((transaction.price() - 200.0).abs() < f64::EPSILON);
}

#[rstest]
#[tokio::test]
async fn buy_of_a_missing_listing_is_not_found() {
    let mut listings = MockListingRepository::new();
    listings.expect_find_by_id().once().returning(|_| Ok(None));

    let err = engine(listings, MockTransactionLedger::new())
        .buy(UserId::random(), ListingId::random())
        .await
        .expect_err("missing listing fails");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn buying_your_own_listing_is_rejected() {
    let owner = UserId::random();
    let stored = sample_listing(owner);
    let id = stored.id();

    let mut ledger = MockTransactionLedger::new();
    ledger.expect_record_purchase().times(0);

    let err = engine(listings_returning(stored), ledger)
        .buy(owner, id)
        .await
        .expect_err("self purchase fails");
    assert_eq!(err.code(), ErrorCode::SelfTransaction);
}

#[rstest]
#[tokio::test]
async fn buying_a_sold_listing_is_unavailable() {
    let stored = {
        let listing = sample_listing(UserId::random());
        Listing::from_parts(
            listing.id(),
            listing.owner(),
            listing.draft().clone(),
            false,
            listing.views(),
            listing.posted_at(),
        )
    };
    let id = stored.id();

    let mut ledger = MockTransactionLedger::new();
    ledger.expect_record_purchase().times(0);

    let err = engine(listings_returning(stored), ledger)
        .buy(UserId::random(), id)
        .await
        .expect_err("sold listing fails");
    assert_eq!(err.code(), ErrorCode::Unavailable);
}

#[rstest]
#[tokio::test]
async fn losing_the_purchase_race_is_unavailable() {
    let stored = sample_listing(UserId::random());
    let id = stored.id();

    let mut ledger = MockTransactionLedger::new();
    ledger
        .expect_record_purchase()
        .once()
        .returning(move |txn| {
            Err(LedgerError::listing_unavailable(txn.listing_id().to_string()))
        });

    let err = engine(listings_returning(stored), ledger)
        .buy(UserId::random(), id)
        .await
        .expect_err("lost race fails");
    assert_eq!(err.code(), ErrorCode::Unavailable);
}

#[rstest]
#[tokio::test]
async fn rent_prices_daily_rates_on_rounded_up_days() {
    let stored = sample_listing(UserId::random());
    let id = stored.id();

    let mut ledger = MockTransactionLedger::new();
    ledger
        .expect_find_active_rental_windows()
        .once()
        .returning(|_| Ok(Vec::new()));
    ledger.expect_record_rental().once().returning(|_| Ok(()));

    // Fixture draft rents at 15 per day; 25 hours bills two days.
    let transaction = engine(listings_returning(stored), ledger)
        .rent(UserId::random(), id, rent_request(1, 25))
        .await
        .expect("rental succeeds");

    assert_eq!(transaction.kind(), TransactionKind::Rental);
    assert!((transaction.price() - 30.0).abs() < f64::EPSILON);
}

#[rstest]
#[tokio::test]
async fn rent_prices_hourly_rates_on_exact_duration() {
    let owner = UserId::random();
    let draft = ListingDraft::new(ListingDraftParts {
        title: "Pressure washer".to_owned(),
        description: "Petrol pressure washer".to_owned(),
        categories: vec!["tools".to_owned()],
        price: 400.0,
        rent_rate: 10.0,
        rent_unit: RentUnit::PerHour,
    })
    .expect("valid draft");
    let stored = Listing::new(ListingId::random(), owner, draft, fixture_timestamp());
    let id = stored.id();

    let mut ledger = MockTransactionLedger::new();
    ledger
        .expect_find_active_rental_windows()
        .once()
        .returning(|_| Ok(Vec::new()));
    ledger.expect_record_rental().once().returning(|_| Ok(()));

    let start = fixture_timestamp() + Duration::hours(1);
    let request = RentRequest {
        start,
        end: start + Duration::minutes(150),
    };
    let transaction = engine(listings_returning(stored), ledger)
        .rent(UserId::random(), id, request)
        .await
        .expect("rental succeeds");

    assert!((transaction.price() - 25.0).abs() < f64::EPSILON);
}

#[rstest]
#[tokio::test]
async fn renting_your_own_listing_is_rejected() {
    let owner = UserId::random();
    let stored = sample_listing(owner);
    let id = stored.id();

    let err = engine(listings_returning(stored), MockTransactionLedger::new())
        .rent(owner, id, rent_request(1, 24))
        .await
        .expect_err("self rental fails");
    assert_eq!(err.code(), ErrorCode::SelfTransaction);
}

#[rstest]
#[tokio::test]
async fn renting_a_sold_listing_is_unavailable() {
    let stored = {
        let listing = sample_listing(UserId::random());
        Listing::from_parts(
            listing.id(),
            listing.owner(),
            listing.draft().clone(),
            false,
            listing.views(),
            listing.posted_at(),
        )
    };
    let id = stored.id();

    let mut ledger = MockTransactionLedger::new();
    ledger.expect_find_active_rental_windows().times(0);
    ledger.expect_record_rental().times(0);

    let err = engine(listings_returning(stored), ledger)
        .rent(UserId::random(), id, rent_request(1, 24))
        .await
        .expect_err("sold listing fails");
    assert_eq!(err.code(), ErrorCode::Unavailable);
}

#[rstest]
#[tokio::test]
async fn inverted_window_is_invalid() {
    let stored = sample_listing(UserId::random());
    let id = stored.id();

    let start = fixture_timestamp() + Duration::hours(2);
    let request = RentRequest {
        start,
        end: start - Duration::hours(1),
    };
    let err = engine(listings_returning(stored), MockTransactionLedger::new())
        .rent(UserId::random(), id, request)
        .await
        .expect_err("inverted window fails");
    assert_eq!(err.code(), ErrorCode::InvalidWindow);
}

#[rstest]
#[tokio::test]
async fn window_starting_in_the_past_is_rejected() {
    let stored = sample_listing(UserId::random());
    let id = stored.id();

    let err = engine(listings_returning(stored), MockTransactionLedger::new())
        .rent(UserId::random(), id, rent_request(-1, 24))
        .await
        .expect_err("past start fails");
    assert_eq!(err.code(), ErrorCode::PastStart);
}

#[rstest]
#[tokio::test]
async fn touching_an_existing_rental_is_a_conflict() {
    let stored = sample_listing(UserId::random());
    let id = stored.id();

    // Existing rental ends exactly where the new request starts.
    let existing_start = fixture_timestamp() + Duration::hours(1);
    let existing = RentalWindow::new(existing_start, existing_start + Duration::hours(24))
        .expect("valid window");

    let mut ledger = MockTransactionLedger::new();
    ledger
        .expect_find_active_rental_windows()
        .once()
        .returning(move |_| Ok(vec![existing]));
    ledger.expect_record_rental().times(0);

    let err = engine(listings_returning(stored), ledger)
        .rent(UserId::random(), id, rent_request(25, 24))
        .await
        .expect_err("touching windows conflict");
    assert_eq!(err.code(), ErrorCode::OverlapConflict);
}

#[rstest]
#[tokio::test]
async fn losing_the_rental_race_is_a_conflict() {
    let stored = sample_listing(UserId::random());
    let id = stored.id();

    let mut ledger = MockTransactionLedger::new();
    ledger
        .expect_find_active_rental_windows()
        .once()
        .returning(|_| Ok(Vec::new()));
    ledger.expect_record_rental().once().returning(move |txn| {
        Err(LedgerError::window_conflict(txn.listing_id().to_string()))
    });

    let err = engine(listings_returning(stored), ledger)
        .rent(UserId::random(), id, rent_request(1, 24))
        .await
        .expect_err("lost race fails");
    assert_eq!(err.code(), ErrorCode::OverlapConflict);
}
