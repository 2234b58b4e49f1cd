//! In-memory port adapters and state wiring for the HTTP flow tests.
//!
//! The adapters hold their rows behind a mutex and reproduce the semantics
//! the real PostgreSQL adapters provide: duplicate-email rejection, matched
//! row reporting, and atomic booking writes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use backend::domain::ports::{
    LedgerError, ListingPersistenceError, ListingRepository, TokenIssuer, TransactionLedger,
    UserPersistenceError, UserRepository,
};
use backend::domain::{
    BookingEngine, CoreAccountService, EmailAddress, LedgerQueryService, Listing,
    ListingCommandService, ListingId, ListingQueryService, PasswordHash, RentalWindow,
    Transaction, TransactionKind, TransactionStatus, User, UserId,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::auth::{Argon2CredentialHasher, JwtTokenIssuer};

/// Account storage keyed by user id.
#[derive(Default)]
pub struct MemoryUserRepository {
    rows: Mutex<HashMap<UserId, (User, PasswordHash)>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        let mut rows = self.rows.lock().expect("user rows poisoned");
        if rows.values().any(|(existing, _)| existing.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(
                user.email().to_string(),
            ));
        }
        rows.insert(user.id(), (user.clone(), password_hash.clone()));
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError> {
        let rows = self.rows.lock().expect("user rows poisoned");
        Ok(rows
            .values()
            .find(|(user, _)| user.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.rows.lock().expect("user rows poisoned");
        Ok(rows.get(id).map(|(user, _)| user.clone()))
    }
}

/// Listing storage keyed by listing id.
#[derive(Default)]
pub struct MemoryListingRepository {
    rows: Mutex<HashMap<ListingId, Listing>>,
}

fn newest_first(mut listings: Vec<Listing>) -> Vec<Listing> {
    listings.sort_by_key(|listing| std::cmp::Reverse(listing.posted_at()));
    listings
}

#[async_trait]
impl ListingRepository for MemoryListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingPersistenceError> {
        let mut rows = self.rows.lock().expect("listing rows poisoned");
        rows.insert(listing.id(), listing.clone());
        Ok(())
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingPersistenceError> {
        let mut rows = self.rows.lock().expect("listing rows poisoned");
        if !rows.contains_key(&listing.id()) {
            return Ok(false);
        }
        rows.insert(listing.id(), listing.clone());
        Ok(true)
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingPersistenceError> {
        let mut rows = self.rows.lock().expect("listing rows poisoned");
        Ok(rows.remove(id).is_some())
    }

    async fn find_by_id(
        &self,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingPersistenceError> {
        let rows = self.rows.lock().expect("listing rows poisoned");
        Ok(rows.get(id).cloned())
    }

    async fn list_available(&self) -> Result<Vec<Listing>, ListingPersistenceError> {
        let rows = self.rows.lock().expect("listing rows poisoned");
        Ok(newest_first(
            rows.values()
                .filter(|listing| listing.is_available())
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Listing>, ListingPersistenceError> {
        let rows = self.rows.lock().expect("listing rows poisoned");
        Ok(newest_first(
            rows.values()
                .filter(|listing| listing.owner() == *owner)
                .cloned()
                .collect(),
        ))
    }

    async fn record_view(&self, id: &ListingId) -> Result<(), ListingPersistenceError> {
        let mut rows = self.rows.lock().expect("listing rows poisoned");
        if let Some(listing) = rows.get_mut(id) {
            listing.record_view();
        }
        Ok(())
    }
}

impl MemoryListingRepository {
    /// Flip availability inside the ledger's booking write.
    fn mark_unavailable(&self, id: &ListingId) -> Result<(), LedgerError> {
        let mut rows = self.rows.lock().expect("listing rows poisoned");
        let Some(listing) = rows.get_mut(id) else {
            return Err(LedgerError::listing_unavailable(id.to_string()));
        };
        if !listing.is_available() {
            return Err(LedgerError::listing_unavailable(id.to_string()));
        }
        *listing = Listing::from_parts(
            listing.id(),
            listing.owner(),
            listing.draft().clone(),
            false,
            listing.views(),
            listing.posted_at(),
        );
        Ok(())
    }
}

fn blocks_window(status: TransactionStatus) -> bool {
    matches!(
        status,
        TransactionStatus::Pending | TransactionStatus::Confirmed
    )
}

/// Append-only ledger that shares the listing store for atomic purchases.
pub struct MemoryTransactionLedger {
    listings: Arc<MemoryListingRepository>,
    rows: Mutex<Vec<Transaction>>,
}

impl MemoryTransactionLedger {
    pub fn new(listings: Arc<MemoryListingRepository>) -> Self {
        Self {
            listings,
            rows: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TransactionLedger for MemoryTransactionLedger {
    async fn record_purchase(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        let mut rows = self.rows.lock().expect("ledger rows poisoned");
        self.listings.mark_unavailable(&transaction.listing_id())?;
        rows.push(transaction.clone());
        Ok(())
    }

    async fn record_rental(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        let mut rows = self.rows.lock().expect("ledger rows poisoned");
        let window = transaction
            .window()
            .copied()
            .ok_or_else(|| LedgerError::query("rental transaction carries no rental window"))?;

        let conflict = rows.iter().any(|existing| {
            existing.listing_id() == transaction.listing_id()
                && existing.kind() == TransactionKind::Rental
                && blocks_window(existing.status())
                && existing
                    .window()
                    .is_some_and(|booked| booked.overlaps(&window))
        });
        if conflict {
            return Err(LedgerError::window_conflict(
                transaction.listing_id().to_string(),
            ));
        }

        rows.push(transaction.clone());
        Ok(())
    }

    async fn find_by_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let rows = self.rows.lock().expect("ledger rows poisoned");
        let mut matching: Vec<Transaction> = rows
            .iter()
            .filter(|transaction| {
                transaction.buyer() == *user_id || transaction.seller() == *user_id
            })
            .cloned()
            .collect();
        matching.sort_by_key(|transaction| std::cmp::Reverse(transaction.created_at()));
        Ok(matching)
    }

    async fn find_active_rental_windows(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<RentalWindow>, LedgerError> {
        let rows = self.rows.lock().expect("ledger rows poisoned");
        Ok(rows
            .iter()
            .filter(|transaction| {
                transaction.listing_id() == *listing_id
                    && transaction.kind() == TransactionKind::Rental
                    && blocks_window(transaction.status())
            })
            .filter_map(|transaction| transaction.window().copied())
            .collect())
    }
}

/// HTTP state with every service wired over the in-memory adapters and a
/// real JWT issuer, so flows exercise the same code paths production uses.
pub fn memory_state() -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(
        "flow-test-secret",
        Arc::clone(&clock),
    ));

    let users = Arc::new(MemoryUserRepository::default());
    let listings = Arc::new(MemoryListingRepository::default());
    let ledger = Arc::new(MemoryTransactionLedger::new(Arc::clone(&listings)));
    let hasher = Arc::new(Argon2CredentialHasher::default());

    HttpState {
        accounts: Arc::new(CoreAccountService::new(
            users,
            hasher,
            Arc::clone(&tokens),
            Arc::clone(&clock),
        )),
        listing_commands: Arc::new(ListingCommandService::new(
            Arc::clone(&listings),
            Arc::clone(&clock),
        )),
        listing_queries: Arc::new(ListingQueryService::new(Arc::clone(&listings))),
        bookings: Arc::new(BookingEngine::new(listings, Arc::clone(&ledger), clock)),
        transactions: Arc::new(LedgerQueryService::new(ledger)),
        tokens,
    }
}
