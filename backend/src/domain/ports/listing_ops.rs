//! Driving ports for listing reads and owner-scoped writes.

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingDraft, ListingId, UserId};

/// Driving port for creating, replacing, and removing listings.
///
/// Every operation is scoped to `owner`: writes against somebody else's
/// listing fail with a forbidden error rather than silently succeeding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingCommand: Send + Sync {
    /// Post a new listing owned by `owner`.
    async fn create(&self, owner: UserId, draft: ListingDraft) -> Result<Listing, Error>;

    /// Replace the mutable fields of an owned listing.
    async fn update(
        &self,
        owner: UserId,
        id: ListingId,
        draft: ListingDraft,
    ) -> Result<Listing, Error>;

    /// Remove an owned listing.
    async fn delete(&self, owner: UserId, id: ListingId) -> Result<(), Error>;
}

/// Driving port for browsing and inspecting listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingQuery: Send + Sync {
    /// Fetch a single listing and bump its view counter.
    async fn get(&self, id: ListingId) -> Result<Listing, Error>;

    /// Browse listings still open for purchase, newest first.
    async fn list_available(&self) -> Result<Vec<Listing>, Error>;

    /// Everything a user has posted, available or not, newest first.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Listing>, Error>;
}

/// Fixture command implementation for tests that do not mutate listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListingCommand;

#[async_trait]
impl ListingCommand for FixtureListingCommand {
    async fn create(&self, _owner: UserId, _draft: ListingDraft) -> Result<Listing, Error> {
        Err(Error::service_unavailable("listing service not configured"))
    }

    async fn update(
        &self,
        _owner: UserId,
        _id: ListingId,
        _draft: ListingDraft,
    ) -> Result<Listing, Error> {
        Err(Error::service_unavailable("listing service not configured"))
    }

    async fn delete(&self, _owner: UserId, _id: ListingId) -> Result<(), Error> {
        Err(Error::service_unavailable("listing service not configured"))
    }
}

/// Fixture query implementation for tests that do not browse listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListingQuery;

#[async_trait]
impl ListingQuery for FixtureListingQuery {
    async fn get(&self, id: ListingId) -> Result<Listing, Error> {
        Err(Error::not_found(format!("listing {id} does not exist")))
    }

    async fn list_available(&self) -> Result<Vec<Listing>, Error> {
        Ok(Vec::new())
    }

    async fn list_for_owner(&self, _owner: UserId) -> Result<Vec<Listing>, Error> {
        Ok(Vec::new())
    }
}
