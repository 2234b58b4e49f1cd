//! Server construction and wiring.
//!
//! Builds the port implementations for the configured environment, threads
//! them into the shared HTTP state, and mounts every handler under the
//! `/api/v1` scope.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};

use backend::domain::ports::TokenIssuer;
use backend::domain::{
    BookingEngine, CoreAccountService, LedgerQueryService, ListingCommandService,
    ListingQueryService,
};
use backend::inbound::http::accounts::{login, me, register};
use backend::inbound::http::bookings::{buy_listing, rent_listing};
use backend::inbound::http::health::healthz;
use backend::inbound::http::listings::{
    browse_listings, create_listing, delete_listing, get_listing, my_listings, update_listing,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::transactions::my_transactions;
use backend::outbound::auth::{Argon2CredentialHasher, JwtTokenIssuer};
use backend::outbound::persistence::{
    DieselListingRepository, DieselTransactionLedger, DieselUserRepository,
};

/// Wire port implementations for the configured environment.
///
/// With a database pool every port gets its Diesel adapter; without one the
/// fixture ports serve, which keeps the process bootable for smoke tests
/// while reporting service unavailability on stateful operations. The token
/// issuer is always real so handed-out sessions verify consistently.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::with_ttl(
        &config.token_secret,
        config.token_ttl,
        Arc::clone(&clock),
    ));

    let Some(pool) = config.db_pool.clone() else {
        return HttpState {
            tokens,
            ..HttpState::fixture()
        };
    };

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let listings = Arc::new(DieselListingRepository::new(pool.clone()));
    let ledger = Arc::new(DieselTransactionLedger::new(pool));
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

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(register)
        .service(login)
        .service(me)
        .service(browse_listings)
        .service(get_listing)
        .service(create_listing)
        .service(update_listing)
        .service(delete_listing)
        .service(my_listings)
        .service(buy_listing)
        .service(rent_listing)
        .service(my_transactions);

    App::new()
        .app_data(http_state)
        .service(api)
        .service(healthz)
}

/// Construct an Actix HTTP server from the given configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let bind_addr = config.bind_addr();
    let http_state = web::Data::new(build_http_state(&config));

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();

    Ok(server)
}
