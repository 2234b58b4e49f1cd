//! Regression coverage for the listing services.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockListingRepository;
use crate::test_support::{fixture_clock, sample_draft, sample_listing};

fn command_service(listings: MockListingRepository) -> ListingCommandService<MockListingRepository> {
    ListingCommandService::new(Arc::new(listings), fixture_clock())
}

fn query_service(listings: MockListingRepository) -> ListingQueryService<MockListingRepository> {
    ListingQueryService::new(Arc::new(listings))
}

#[rstest]
#[tokio::test]
async fn create_persists_a_fresh_available_listing() {
    let owner = UserId::random();

    let mut listings = MockListingRepository::new();
    listings
        .expect_insert()
        .withf(move |listing| {
            listing.owner() == owner && listing.is_available() && listing.views() == 0
        })
        .once()
        .returning(|_| Ok(()));

    let listing = command_service(listings)
        .create(owner, sample_draft())
        .await
        .expect("create succeeds");
    assert_eq!(listing.draft().title(), "Camera");
}

#[rstest]
#[tokio::test]
async fn update_replaces_the_draft_of_an_owned_listing() {
    let owner = UserId::random();
    let stored = sample_listing(owner);
    let id = stored.id();

    let mut listings = MockListingRepository::new();
    listings
        .expect_find_by_id()
        .once()
        .returning(move |_| Ok(Some(stored.clone())));
    listings
        .expect_update()
        .withf(|listing| listing.draft().title() == "Telescope")
        .once()
        .returning(|_| Ok(true));

    let draft = ListingDraft::new(crate::domain::ListingDraftParts {
        title: "Telescope".to_owned(),
        description: "Refractor on a tripod".to_owned(),
        categories: vec!["optics".to_owned()],
        price: 300.0,
        rent_rate: 20.0,
        rent_unit: crate::domain::RentUnit::PerDay,
    })
    .expect("valid draft");

    let updated = command_service(listings)
        .update(owner, id, draft)
        .await
        .expect("update succeeds");
    assert_eq!(updated.draft().title(), "Telescope");
}

#[rstest]
#[tokio::test]
async fn update_by_a_stranger_is_forbidden() {
    let stored = sample_listing(UserId::random());
    let id = stored.id();

    let mut listings = MockListingRepository::new();
    listings
        .expect_find_by_id()
        .once()
        .returning(move |_| Ok(Some(stored.clone())));
    listings.expect_update().times(0);

    let err = command_service(listings)
        .update(UserId::random(), id, sample_draft())
        .await
        .expect_err("stranger update fails");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn delete_of_a_missing_listing_is_not_found() {
    let mut listings = MockListingRepository::new();
    listings.expect_find_by_id().once().returning(|_| Ok(None));
    listings.expect_delete().times(0);

    let err = command_service(listings)
        .delete(UserId::random(), ListingId::random())
        .await
        .expect_err("missing listing fails");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_removes_an_owned_listing() {
    let owner = UserId::random();
    let stored = sample_listing(owner);
    let id = stored.id();

    let mut listings = MockListingRepository::new();
    listings
        .expect_find_by_id()
        .once()
        .returning(move |_| Ok(Some(stored.clone())));
    listings
        .expect_delete()
        .withf(move |candidate| *candidate == id)
        .once()
        .returning(|_| Ok(true));

    command_service(listings)
        .delete(owner, id)
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn get_bumps_the_view_counter() {
    let stored = sample_listing(UserId::random());
    let id = stored.id();

    let mut listings = MockListingRepository::new();
    listings
        .expect_find_by_id()
        .once()
        .returning(move |_| Ok(Some(stored.clone())));
    listings.expect_record_view().once().returning(|_| Ok(()));

    let listing = query_service(listings).get(id).await.expect("get succeeds");
    assert_eq!(listing.views(), 1);
}

#[rstest]
#[tokio::test]
async fn get_survives_a_failed_view_bump() {
    let stored = sample_listing(UserId::random());
    let id = stored.id();

    let mut listings = MockListingRepository::new();
    listings
        .expect_find_by_id()
        .once()
        .returning(move |_| Ok(Some(stored.clone())));
    listings
        .expect_record_view()
        .once()
        .returning(|_| Err(ListingPersistenceError::query("lock timeout")));

    let listing = query_service(listings).get(id).await.expect("get succeeds");
    assert_eq!(listing.views(), 0);
}

#[rstest]
#[tokio::test]
async fn browse_passes_through_the_repository_ordering() {
    let first = sample_listing(UserId::random());
    let second = sample_listing(UserId::random());
    let expected = vec![first.id(), second.id()];

    let mut listings = MockListingRepository::new();
    let rows = vec![first, second];
    listings
        .expect_list_available()
        .once()
        .returning(move || Ok(rows.clone()));

    let browsed = query_service(listings)
        .list_available()
        .await
        .expect("browse succeeds");
    let ids: Vec<_> = browsed.iter().map(Listing::id).collect();
    assert_eq!(ids, expected);
}

#[rstest]
#[tokio::test]
async fn repository_outage_maps_to_service_unavailable() {
    let mut listings = MockListingRepository::new();
    listings
        .expect_list_available()
        .once()
        .returning(|| Err(ListingPersistenceError::connection("refused")));

    let err = query_service(listings)
        .list_available()
        .await
        .expect_err("outage fails");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
