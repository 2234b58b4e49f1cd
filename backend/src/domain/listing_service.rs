//! Listing domain services: owner-scoped writes and public reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    ListingCommand, ListingPersistenceError, ListingQuery, ListingRepository,
};
use crate::domain::{Error, Listing, ListingDraft, ListingId, UserId};

fn map_repository_error(error: ListingPersistenceError) -> Error {
    match error {
        ListingPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("listing repository unavailable: {message}"))
        }
        ListingPersistenceError::Query { message } => {
            Error::internal(format!("listing repository error: {message}"))
        }
    }
}

fn not_found(id: ListingId) -> Error {
    Error::not_found(format!("listing {id} does not exist"))
}

/// Listing service implementing the command driving port.
#[derive(Clone)]
pub struct ListingCommandService<R> {
    listings: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ListingCommandService<R> {
    /// Create a new command service.
    pub fn new(listings: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { listings, clock }
    }
}

impl<R> ListingCommandService<R>
where
    R: ListingRepository,
{
    /// Load a listing and enforce that `owner` posted it.
    async fn find_owned(&self, owner: UserId, id: ListingId) -> Result<Listing, Error> {
        let listing = self
            .listings
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;
        if listing.owner() != owner {
            return Err(Error::forbidden("only the owner may modify a listing"));
        }
        Ok(listing)
    }
}

#[async_trait]
impl<R> ListingCommand for ListingCommandService<R>
where
    R: ListingRepository,
{
    async fn create(&self, owner: UserId, draft: ListingDraft) -> Result<Listing, Error> {
        let listing = Listing::new(ListingId::random(), owner, draft, self.clock.utc());
        self.listings
            .insert(&listing)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(listing_id = %listing.id(), owner = %owner, "listing created");
        Ok(listing)
    }

    async fn update(
        &self,
        owner: UserId,
        id: ListingId,
        draft: ListingDraft,
    ) -> Result<Listing, Error> {
        let mut listing = self.find_owned(owner, id).await?;
        listing.apply_draft(draft);
        let matched = self
            .listings
            .update(&listing)
            .await
            .map_err(map_repository_error)?;
        if !matched {
            // Deleted between the read and the write.
            return Err(not_found(id));
        }
        Ok(listing)
    }

    async fn delete(&self, owner: UserId, id: ListingId) -> Result<(), Error> {
        self.find_owned(owner, id).await?;
        let matched = self
            .listings
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !matched {
            return Err(not_found(id));
        }
        tracing::info!(listing_id = %id, owner = %owner, "listing deleted");
        Ok(())
    }
}

/// Listing service implementing the query driving port.
#[derive(Clone)]
pub struct ListingQueryService<R> {
    listings: Arc<R>,
}

impl<R> ListingQueryService<R> {
    /// Create a new query service.
    pub fn new(listings: Arc<R>) -> Self {
        Self { listings }
    }
}

#[async_trait]
impl<R> ListingQuery for ListingQueryService<R>
where
    R: ListingRepository,
{
    async fn get(&self, id: ListingId) -> Result<Listing, Error> {
        let mut listing = self
            .listings
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;

        // The view counter is advisory; a failed bump must not hide the
        // listing from the caller.
        match self.listings.record_view(&id).await {
            Ok(()) => listing.record_view(),
            Err(err) => {
                tracing::warn!(listing_id = %id, error = %err, "view count bump failed");
            }
        }

        Ok(listing)
    }

    async fn list_available(&self) -> Result<Vec<Listing>, Error> {
        self.listings
            .list_available()
            .await
            .map_err(map_repository_error)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Listing>, Error> {
        self.listings
            .list_by_owner(&owner)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "listing_service_tests.rs"]
mod tests;
