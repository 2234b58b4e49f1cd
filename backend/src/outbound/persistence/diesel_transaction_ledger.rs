//! PostgreSQL-backed `TransactionLedger` implementation using Diesel ORM.
//!
//! The booking writes here own the storage transactions that make races
//! safe: a purchase flips `is_available` and appends the record in one
//! transaction, and a rental re-checks the window under serializable
//! isolation before appending. Losing either race surfaces as the matching
//! ledger error instead of a double booking.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{LedgerError, TransactionLedger};
use crate::domain::{
    ListingId, RentalWindow, Transaction, TransactionId, TransactionKind, TransactionStatus,
    UserId,
};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTransactionRow, TransactionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{listings, transactions};

/// Diesel-backed implementation of the transaction ledger port.
#[derive(Clone)]
pub struct DieselTransactionLedger {
    pool: DbPool,
}

impl DieselTransactionLedger {
    /// Create a new ledger with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain ledger errors.
fn map_pool_error(error: PoolError) -> LedgerError {
    map_basic_pool_error(error, LedgerError::connection)
}

/// Map Diesel errors to domain ledger errors.
fn map_diesel_error(error: diesel::result::Error) -> LedgerError {
    map_basic_diesel_error(error, LedgerError::query, LedgerError::connection)
}

/// Outcome of a booking write inside a storage transaction.
///
/// Conflict variants must abort the transaction, so they travel through the
/// closure's error channel alongside Diesel failures.
#[derive(Debug)]
enum BookingWriteError {
    Diesel(diesel::result::Error),
    ListingUnavailable,
    WindowConflict,
}

impl From<diesel::result::Error> for BookingWriteError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_booking_write_error(error: BookingWriteError, listing_id: ListingId) -> LedgerError {
    match error {
        BookingWriteError::Diesel(err) => map_diesel_error(err),
        BookingWriteError::ListingUnavailable => {
            LedgerError::listing_unavailable(listing_id.to_string())
        }
        BookingWriteError::WindowConflict => LedgerError::window_conflict(listing_id.to_string()),
    }
}

/// Statuses whose rentals hold their window against new bookings.
fn blocking_statuses() -> [&'static str; 2] {
    [
        TransactionStatus::Pending.as_str(),
        TransactionStatus::Confirmed.as_str(),
    ]
}

/// Build the insertable row for a domain transaction.
fn transaction_to_row(transaction: &Transaction) -> NewTransactionRow<'_> {
    NewTransactionRow {
        id: *transaction.id().as_uuid(),
        kind: transaction.kind().as_str(),
        listing_id: *transaction.listing_id().as_uuid(),
        buyer_id: *transaction.buyer().as_uuid(),
        seller_id: *transaction.seller().as_uuid(),
        price: transaction.price(),
        rent_start: transaction.window().map(|window| window.start()),
        rent_end: transaction.window().map(|window| window.end()),
        status: transaction.status().as_str(),
        created_at: transaction.created_at(),
    }
}

/// Convert a database row into a validated domain transaction.
fn row_to_transaction(row: TransactionRow) -> Result<Transaction, LedgerError> {
    let TransactionRow {
        id,
        kind,
        listing_id,
        buyer_id,
        seller_id,
        price,
        rent_start,
        rent_end,
        status,
        created_at,
    } = row;

    let kind: TransactionKind = kind.parse().map_err(LedgerError::query)?;
    let status: TransactionStatus = status.parse().map_err(LedgerError::query)?;

    let window = match (rent_start, rent_end) {
        (Some(start), Some(end)) => Some(
            RentalWindow::new(start, end)
                .map_err(|err| LedgerError::query(err.to_string()))?,
        ),
        (None, None) => None,
        _ => {
            return Err(LedgerError::query(
                "rental window is missing one of its endpoints",
            ));
        }
    };

    Ok(Transaction::from_parts(
        TransactionId::from_uuid(id),
        kind,
        ListingId::from_uuid(listing_id),
        UserId::from_uuid(buyer_id),
        UserId::from_uuid(seller_id),
        price,
        window,
        status,
        created_at,
    ))
}

#[async_trait]
impl TransactionLedger for DieselTransactionLedger {
    async fn record_purchase(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let listing_id = transaction.listing_id();
        let listing_uuid = *listing_id.as_uuid();
        let new_row = transaction_to_row(transaction);

        conn.transaction(|conn| {
            async move {
                // Conditional flip doubles as the availability re-check:
                // zero matched rows means another purchase won the race.
                let claimed = diesel::update(
                    listings::table.filter(
                        listings::id
                            .eq(listing_uuid)
                            .and(listings::is_available.eq(true)),
                    ),
                )
                .set(listings::is_available.eq(false))
                .execute(conn)
                .await?;

                if claimed == 0 {
                    return Err(BookingWriteError::ListingUnavailable);
                }

                diesel::insert_into(transactions::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_booking_write_error(err, listing_id))
    }

    async fn record_rental(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let listing_id = transaction.listing_id();
        let listing_uuid = *listing_id.as_uuid();
        let window = transaction.window().copied().ok_or_else(|| {
            LedgerError::query("rental transaction carries no rental window")
        })?;
        let new_row = transaction_to_row(transaction);

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    // Serializable isolation makes the count and the insert
                    // atomic with respect to competing rentals.
                    let conflicting: i64 = transactions::table
                        .filter(
                            transactions::listing_id
                                .eq(listing_uuid)
                                .and(transactions::kind.eq(TransactionKind::Rental.as_str()))
                                .and(transactions::status.eq_any(blocking_statuses()))
                                .and(transactions::rent_start.le(window.end()))
                                .and(transactions::rent_end.ge(window.start())),
                        )
                        .count()
                        .get_result(conn)
                        .await?;

                    if conflicting > 0 {
                        return Err(BookingWriteError::WindowConflict);
                    }

                    diesel::insert_into(transactions::table)
                        .values(&new_row)
                        .execute(conn)
                        .await?;

                    Ok(())
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_booking_write_error(err, listing_id))
    }

    async fn find_by_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TransactionRow> = transactions::table
            .filter(
                transactions::buyer_id
                    .eq(user_id.as_uuid())
                    .or(transactions::seller_id.eq(user_id.as_uuid())),
            )
            .order((transactions::created_at.desc(), transactions::id.desc()))
            .select(TransactionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_transaction).collect()
    }

    async fn find_active_rental_windows(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<RentalWindow>, LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let endpoints: Vec<(Option<chrono::DateTime<chrono::Utc>>, Option<chrono::DateTime<chrono::Utc>>)> =
            transactions::table
                .filter(
                    transactions::listing_id
                        .eq(listing_id.as_uuid())
                        .and(transactions::kind.eq(TransactionKind::Rental.as_str()))
                        .and(transactions::status.eq_any(blocking_statuses())),
                )
                .select((transactions::rent_start, transactions::rent_end))
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        endpoints
            .into_iter()
            .map(|(start, end)| {
                let (start, end) = start.zip(end).ok_or_else(|| {
                    LedgerError::query("rental window is missing one of its endpoints")
                })?;
                RentalWindow::new(start, end)
                    .map_err(|err| LedgerError::query(err.to_string()))
            })
            .collect()
    }
}
