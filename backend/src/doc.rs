//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, listings,
//!   bookings, transactions, health)
//! - **Schemas**: Request/response bodies plus the domain enums and error
//!   envelope they embed
//! - **Security**: Bearer token authentication scheme

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, RentUnit, TransactionKind, TransactionStatus};
use crate::inbound::http::accounts::{
    AuthResponseBody, LoginRequestBody, RegisterRequestBody, UserBody,
};
use crate::inbound::http::bookings::RentRequestBody;
use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::listings::{ListingBody, ListingDraftBody};
use crate::inbound::http::transactions::TransactionBody;

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Session token issued by POST /api/v1/auth/register or /api/v1/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Marketplace backend API",
        description = "HTTP interface for account, listing, and booking operations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::me,
        crate::inbound::http::listings::browse_listings,
        crate::inbound::http::listings::get_listing,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::update_listing,
        crate::inbound::http::listings::delete_listing,
        crate::inbound::http::listings::my_listings,
        crate::inbound::http::bookings::buy_listing,
        crate::inbound::http::bookings::rent_listing,
        crate::inbound::http::transactions::my_transactions,
        crate::inbound::http::health::healthz,
    ),
    components(schemas(
        RegisterRequestBody,
        LoginRequestBody,
        UserBody,
        AuthResponseBody,
        ListingDraftBody,
        ListingBody,
        RentRequestBody,
        TransactionBody,
        HealthResponse,
        RentUnit,
        TransactionKind,
        TransactionStatus,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "auth", description = "Registration, login, and session introspection"),
        (name = "listings", description = "Browsing and managing marketplace listings"),
        (name = "bookings", description = "Purchasing and renting listings"),
        (name = "transactions", description = "Transaction history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
