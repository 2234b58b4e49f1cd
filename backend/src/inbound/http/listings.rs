//! Listing HTTP handlers.
//!
//! ```text
//! GET    /api/v1/listings
//! GET    /api/v1/listings/{id}
//! POST   /api/v1/listings
//! PUT    /api/v1/listings/{id}
//! DELETE /api/v1/listings/{id}
//! GET    /api/v1/my/listings
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Listing, ListingDraft, ListingDraftParts, ListingId, RentUnit};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Mutable listing fields accepted on create and update.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraftBody {
    #[schema(example = "Mirrorless camera")]
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    #[schema(example = 200.0)]
    pub price: f64,
    #[schema(example = 15.0)]
    pub rent_rate: f64,
    pub rent_unit: RentUnit,
}

/// Public listing representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub price: f64,
    pub rent_rate: f64,
    pub rent_unit: RentUnit,
    pub is_available: bool,
    pub views: i32,
    #[schema(format = "date-time")]
    pub posted_at: String,
}

impl From<Listing> for ListingBody {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id().to_string(),
            owner_id: listing.owner().to_string(),
            title: listing.draft().title().to_owned(),
            description: listing.draft().description().to_owned(),
            categories: listing.draft().categories().to_vec(),
            price: listing.draft().price(),
            rent_rate: listing.draft().rent_rate(),
            rent_unit: listing.draft().rent_unit(),
            is_available: listing.is_available(),
            views: listing.views(),
            posted_at: listing.posted_at().to_rfc3339(),
        }
    }
}

fn parse_draft(body: ListingDraftBody) -> Result<ListingDraft, Error> {
    ListingDraft::new(ListingDraftParts {
        title: body.title,
        description: body.description,
        categories: body.categories,
        price: body.price,
        rent_rate: body.rent_rate,
        rent_unit: body.rent_unit,
    })
    .map_err(|err| Error::invalid_request(err.to_string()))
}

fn parse_listing_id(raw: &str) -> Result<ListingId, Error> {
    parse_uuid(raw, FieldName::new("listingId")).map(ListingId::from_uuid)
}

/// Browse listings still open for purchase.
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    responses(
        (status = 200, description = "Available listings, newest first", body = [ListingBody]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["listings"],
    operation_id = "browseListings"
)]
#[get("/listings")]
pub async fn browse_listings(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ListingBody>>> {
    let listings = state.listing_queries.list_available().await?;
    Ok(web::Json(listings.into_iter().map(Into::into).collect()))
}

/// Fetch a single listing, counting the view.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Listing identifier")),
    responses(
        (status = 200, description = "The listing", body = ListingBody),
        (status = 400, description = "Malformed listing id", body = Error),
        (status = 404, description = "Listing does not exist", body = Error)
    ),
    tags = ["listings"],
    operation_id = "getListing"
)]
#[get("/listings/{id}")]
pub async fn get_listing(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingBody>> {
    let id = parse_listing_id(&path.into_inner())?;
    let listing = state.listing_queries.get(id).await?;
    Ok(web::Json(ListingBody::from(listing)))
}

/// Post a new listing owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body = ListingDraftBody,
    responses(
        (status = 200, description = "Listing created", body = ListingBody),
        (status = 400, description = "Invalid listing payload", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["listings"],
    operation_id = "createListing",
    security(("BearerToken" = []))
)]
#[post("/listings")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<ListingDraftBody>,
) -> ApiResult<web::Json<ListingBody>> {
    let claims = identity.require()?;
    let draft = parse_draft(payload.into_inner())?;
    let listing = state.listing_commands.create(claims.user_id, draft).await?;
    Ok(web::Json(ListingBody::from(listing)))
}

/// Replace the mutable fields of an owned listing.
#[utoipa::path(
    put,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Listing identifier")),
    request_body = ListingDraftBody,
    responses(
        (status = 200, description = "Listing updated", body = ListingBody),
        (status = 400, description = "Invalid listing payload", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Not the listing owner", body = Error),
        (status = 404, description = "Listing does not exist", body = Error)
    ),
    tags = ["listings"],
    operation_id = "updateListing",
    security(("BearerToken" = []))
)]
#[put("/listings/{id}")]
pub async fn update_listing(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
    payload: web::Json<ListingDraftBody>,
) -> ApiResult<web::Json<ListingBody>> {
    let claims = identity.require()?;
    let id = parse_listing_id(&path.into_inner())?;
    let draft = parse_draft(payload.into_inner())?;
    let listing = state
        .listing_commands
        .update(claims.user_id, id, draft)
        .await?;
    Ok(web::Json(ListingBody::from(listing)))
}

/// Remove an owned listing.
#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Listing identifier")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Not the listing owner", body = Error),
        (status = 404, description = "Listing does not exist", body = Error)
    ),
    tags = ["listings"],
    operation_id = "deleteListing",
    security(("BearerToken" = []))
)]
#[delete("/listings/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let claims = identity.require()?;
    let id = parse_listing_id(&path.into_inner())?;
    state.listing_commands.delete(claims.user_id, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Everything the authenticated user has posted.
#[utoipa::path(
    get,
    path = "/api/v1/my/listings",
    responses(
        (status = 200, description = "Own listings, newest first", body = [ListingBody]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["listings"],
    operation_id = "myListings",
    security(("BearerToken" = []))
)]
#[get("/my/listings")]
pub async fn my_listings(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<Vec<ListingBody>>> {
    let claims = identity.require()?;
    let listings = state.listing_queries.list_for_owner(claims.user_id).await?;
    Ok(web::Json(listings.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
#[path = "listings_tests.rs"]
mod tests;
