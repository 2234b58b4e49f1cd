//! PostgreSQL-backed `ListingRepository` implementation using Diesel ORM.
//!
//! This adapter persists listings and reconstructs them through validated
//! domain constructors so corrupt rows surface as query errors instead of
//! leaking into the domain.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ListingPersistenceError, ListingRepository};
use crate::domain::{Listing, ListingDraft, ListingDraftParts, ListingId, UserId};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ListingRow, ListingUpdate, NewListingRow};
use super::pool::{DbPool, PoolError};
use super::schema::listings;

/// Diesel-backed implementation of the listing repository port.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> ListingPersistenceError {
    map_basic_pool_error(error, ListingPersistenceError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ListingPersistenceError {
    map_basic_diesel_error(
        error,
        ListingPersistenceError::query,
        ListingPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain listing.
fn row_to_listing(row: ListingRow) -> Result<Listing, ListingPersistenceError> {
    let ListingRow {
        id,
        owner_id,
        title,
        description,
        categories,
        price,
        rent_rate,
        rent_unit,
        is_available,
        views,
        posted_at,
    } = row;

    let rent_unit = rent_unit
        .parse()
        .map_err(ListingPersistenceError::query)?;
    let draft = ListingDraft::new(ListingDraftParts {
        title,
        description,
        categories,
        price,
        rent_rate,
        rent_unit,
    })
    .map_err(|err| ListingPersistenceError::query(err.to_string()))?;

    Ok(Listing::from_parts(
        ListingId::from_uuid(id),
        UserId::from_uuid(owner_id),
        draft,
        is_available,
        views,
        posted_at,
    ))
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let draft = listing.draft();

        let new_row = NewListingRow {
            id: *listing.id().as_uuid(),
            owner_id: *listing.owner().as_uuid(),
            title: draft.title(),
            description: draft.description(),
            categories: draft.categories(),
            price: draft.price(),
            rent_rate: draft.rent_rate(),
            rent_unit: draft.rent_unit().as_str(),
            is_available: listing.is_available(),
            views: listing.views(),
            posted_at: listing.posted_at(),
        };

        diesel::insert_into(listings::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let draft = listing.draft();

        let changeset = ListingUpdate {
            title: draft.title(),
            description: draft.description(),
            categories: draft.categories(),
            price: draft.price(),
            rent_rate: draft.rent_rate(),
            rent_unit: draft.rent_unit().as_str(),
        };

        let matched = diesel::update(listings::table.filter(listings::id.eq(listing.id().as_uuid())))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(matched > 0)
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let matched = diesel::delete(listings::table.filter(listings::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(matched > 0)
    }

    async fn find_by_id(
        &self,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = listings::table
            .filter(listings::id.eq(id.as_uuid()))
            .select(ListingRow::as_select())
            .first::<ListingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_listing).transpose()
    }

    async fn list_available(&self) -> Result<Vec<Listing>, ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ListingRow> = listings::table
            .filter(listings::is_available.eq(true))
            .order((listings::posted_at.desc(), listings::id.desc()))
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_listing).collect()
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Listing>, ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ListingRow> = listings::table
            .filter(listings::owner_id.eq(owner.as_uuid()))
            .order((listings::posted_at.desc(), listings::id.desc()))
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_listing).collect()
    }

    async fn record_view(&self, id: &ListingId) -> Result<(), ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(listings::table.filter(listings::id.eq(id.as_uuid())))
            .set(listings::views.eq(listings::views + 1))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;
    use crate::domain::RentUnit;

    #[fixture]
    fn valid_row() -> ListingRow {
        ListingRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Camera".to_owned(),
            description: "A nice camera".to_owned(),
            categories: vec!["ELECTRONICS".to_owned()],
            price: 200.0,
            rent_rate: 15.0,
            rent_unit: "PER_DAY".to_owned(),
            is_available: true,
            views: 3,
            posted_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(
            repo_err,
            ListingPersistenceError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, ListingPersistenceError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_builds_listing(valid_row: ListingRow) {
        let expected_id = valid_row.id;
        let listing = row_to_listing(valid_row).expect("valid row converts");

        assert_eq!(listing.id().as_uuid(), &expected_id);
        assert_eq!(listing.draft().rent_unit(), RentUnit::PerDay);
        assert_eq!(listing.views(), 3);
        assert!(listing.is_available());
    }

    #[rstest]
    fn row_conversion_rejects_unknown_rent_unit(mut valid_row: ListingRow) {
        valid_row.rent_unit = "PER_FORTNIGHT".to_owned();

        let error = row_to_listing(valid_row).expect_err("unknown unit should fail");
        assert!(matches!(error, ListingPersistenceError::Query { .. }));
        assert!(error.to_string().contains("unknown rent unit"));
    }

    #[rstest]
    fn row_conversion_rejects_corrupt_price(mut valid_row: ListingRow) {
        valid_row.price = f64::NAN;

        let error = row_to_listing(valid_row).expect_err("corrupt price should fail");
        assert!(matches!(error, ListingPersistenceError::Query { .. }));
    }
}
