//! Booking HTTP handlers.
//!
//! ```text
//! POST /api/v1/listings/{id}/buy
//! POST /api/v1/listings/{id}/rentals
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RentRequest;
use crate::domain::{Error, ListingId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::transactions::TransactionBody;
use crate::inbound::http::validation::{FieldName, parse_rfc3339_timestamp, parse_uuid};

/// Request payload for renting a listing.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentRequestBody {
    #[schema(format = "date-time", example = "2026-09-01T09:00:00Z")]
    pub rent_start_date: String,
    #[schema(format = "date-time", example = "2026-09-02T09:00:00Z")]
    pub rent_end_date: String,
}

fn parse_listing_id(raw: &str) -> Result<ListingId, Error> {
    parse_uuid(raw, FieldName::new("listingId")).map(ListingId::from_uuid)
}

fn parse_rent_request(body: RentRequestBody) -> Result<RentRequest, Error> {
    Ok(RentRequest {
        start: parse_rfc3339_timestamp(&body.rent_start_date, FieldName::new("rentStartDate"))?,
        end: parse_rfc3339_timestamp(&body.rent_end_date, FieldName::new("rentEndDate"))?,
    })
}

/// Buy a listing outright.
#[utoipa::path(
    post,
    path = "/api/v1/listings/{id}/buy",
    params(("id" = String, Path, format = "uuid", description = "Listing identifier")),
    responses(
        (status = 200, description = "Purchase recorded", body = TransactionBody),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Own listing", body = Error),
        (status = 404, description = "Listing does not exist", body = Error),
        (status = 409, description = "Listing no longer available", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "buyListing",
    security(("BearerToken" = []))
)]
#[post("/listings/{id}/buy")]
pub async fn buy_listing(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
) -> ApiResult<web::Json<TransactionBody>> {
    let claims = identity.require()?;
    let id = parse_listing_id(&path.into_inner())?;
    let transaction = state.bookings.buy(claims.user_id, id).await?;
    Ok(web::Json(TransactionBody::from(transaction)))
}

/// Rent a listing over a window.
#[utoipa::path(
    post,
    path = "/api/v1/listings/{id}/rentals",
    params(("id" = String, Path, format = "uuid", description = "Listing identifier")),
    request_body = RentRequestBody,
    responses(
        (status = 200, description = "Rental recorded", body = TransactionBody),
        (status = 400, description = "Invalid rental window", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Own listing", body = Error),
        (status = 404, description = "Listing does not exist", body = Error),
        (status = 409, description = "Window already booked", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "rentListing",
    security(("BearerToken" = []))
)]
#[post("/listings/{id}/rentals")]
pub async fn rent_listing(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
    payload: web::Json<RentRequestBody>,
) -> ApiResult<web::Json<TransactionBody>> {
    let claims = identity.require()?;
    let id = parse_listing_id(&path.into_inner())?;
    let request = parse_rent_request(payload.into_inner())?;
    let transaction = state.bookings.rent(claims.user_id, id, request).await?;
    Ok(web::Json(TransactionBody::from(transaction)))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
