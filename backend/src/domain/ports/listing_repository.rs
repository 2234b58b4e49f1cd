//! Port for listing persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Listing, ListingId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by listing repository adapters.
    pub enum ListingPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "listing repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "listing repository query failed: {message}",
    }
}

/// Port for storing and browsing listings.
///
/// `update` and `delete` report whether a row matched so services can
/// distinguish a missing listing from a successful write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persist a new listing.
    async fn insert(&self, listing: &Listing) -> Result<(), ListingPersistenceError>;

    /// Replace the stored state of an existing listing.
    async fn update(&self, listing: &Listing) -> Result<bool, ListingPersistenceError>;

    /// Remove a listing. Returns `false` when no row matched.
    async fn delete(&self, id: &ListingId) -> Result<bool, ListingPersistenceError>;

    /// Fetch a listing by identifier.
    async fn find_by_id(&self, id: &ListingId)
    -> Result<Option<Listing>, ListingPersistenceError>;

    /// Browse listings still open for purchase, newest first.
    async fn list_available(&self) -> Result<Vec<Listing>, ListingPersistenceError>;

    /// List everything a user has posted, available or not, newest first.
    async fn list_by_owner(&self, owner: &UserId)
    -> Result<Vec<Listing>, ListingPersistenceError>;

    /// Bump the ad-hoc view counter. Lost updates under concurrency are
    /// acceptable; the counter is advisory.
    async fn record_view(&self, id: &ListingId) -> Result<(), ListingPersistenceError>;
}

/// Fixture implementation for tests that do not exercise listing persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListingRepository;

#[async_trait]
impl ListingRepository for FixtureListingRepository {
    async fn insert(&self, _listing: &Listing) -> Result<(), ListingPersistenceError> {
        Ok(())
    }

    async fn update(&self, _listing: &Listing) -> Result<bool, ListingPersistenceError> {
        Ok(false)
    }

    async fn delete(&self, _id: &ListingId) -> Result<bool, ListingPersistenceError> {
        Ok(false)
    }

    async fn find_by_id(
        &self,
        _id: &ListingId,
    ) -> Result<Option<Listing>, ListingPersistenceError> {
        Ok(None)
    }

    async fn list_available(&self) -> Result<Vec<Listing>, ListingPersistenceError> {
        Ok(Vec::new())
    }

    async fn list_by_owner(
        &self,
        _owner: &UserId,
    ) -> Result<Vec<Listing>, ListingPersistenceError> {
        Ok(Vec::new())
    }

    async fn record_view(&self, _id: &ListingId) -> Result<(), ListingPersistenceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_reads_are_empty() {
        let repo = FixtureListingRepository;
        assert!(
            repo.find_by_id(&ListingId::random())
                .await
                .expect("fixture lookup succeeds")
                .is_none()
        );
        assert!(
            repo.list_available()
                .await
                .expect("fixture list succeeds")
                .is_empty()
        );
        assert!(
            repo.list_by_owner(&UserId::random())
                .await
                .expect("fixture list succeeds")
                .is_empty()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_writes_report_no_match() {
        let repo = FixtureListingRepository;
        assert!(!repo.delete(&ListingId::random()).await.expect("delete"));
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = ListingPersistenceError::connection("refused");
        assert!(err.to_string().contains("refused"));
    }
}
