//! Transaction history HTTP handlers.
//!
//! ```text
//! GET /api/v1/my/transactions
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, Transaction, TransactionKind, TransactionStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;

/// Public transaction representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub kind: TransactionKind,
    #[schema(format = "uuid")]
    pub listing_id: String,
    #[schema(format = "uuid")]
    pub buyer_id: String,
    #[schema(format = "uuid")]
    pub seller_id: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time")]
    pub rent_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time")]
    pub rent_end_date: Option<String>,
    pub status: TransactionStatus,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Transaction> for TransactionBody {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id().to_string(),
            kind: transaction.kind(),
            listing_id: transaction.listing_id().to_string(),
            buyer_id: transaction.buyer().to_string(),
            seller_id: transaction.seller().to_string(),
            price: transaction.price(),
            rent_start_date: transaction.window().map(|w| w.start().to_rfc3339()),
            rent_end_date: transaction.window().map(|w| w.end().to_rfc3339()),
            status: transaction.status(),
            created_at: transaction.created_at().to_rfc3339(),
        }
    }
}

/// Transactions where the authenticated user is buyer or seller.
#[utoipa::path(
    get,
    path = "/api/v1/my/transactions",
    responses(
        (status = 200, description = "Transaction history, newest first", body = [TransactionBody]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["transactions"],
    operation_id = "myTransactions",
    security(("BearerToken" = []))
)]
#[get("/my/transactions")]
pub async fn my_transactions(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<Vec<TransactionBody>>> {
    let claims = identity.require()?;
    let history = state
        .transactions
        .list_for_participant(claims.user_id)
        .await?;
    Ok(web::Json(history.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
#[path = "transactions_tests.rs"]
mod tests;
