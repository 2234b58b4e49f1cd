//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: String,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration with the default token lifetime.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: impl Into<String>) -> Self {
        Self {
            bind_addr,
            token_secret: token_secret.into(),
            token_ttl: backend::outbound::auth::DEFAULT_TOKEN_TTL,
            db_pool: None,
        }
    }

    /// Override the session token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When absent, the server falls back to fixture adapters; every
    /// stateful operation then reports service unavailability.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
