//! Marketplace backend entry-point: wires the REST API over PostgreSQL.

mod server;

use std::env;
use std::net::SocketAddr;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

fn parse_bind_addr() -> std::io::Result<SocketAddr> {
    env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))
}

fn token_secret() -> std::io::Result<String> {
    match env::var("TOKEN_SECRET") {
        Ok(secret) if !secret.is_empty() => Ok(secret),
        _ if cfg!(debug_assertions) => {
            warn!("using ephemeral token secret (dev only); sessions will not survive restarts");
            Ok(uuid::Uuid::new_v4().to_string())
        }
        _ => Err(std::io::Error::other("TOKEN_SECRET must be set")),
    }
}

fn pool_config(database_url: String) -> std::io::Result<PoolConfig> {
    let config = PoolConfig::new(database_url);
    let Ok(raw) = env::var("POOL_MAX_SIZE") else {
        return Ok(config);
    };
    raw.parse::<u32>()
        .map(|size| config.with_max_size(size))
        .map_err(|e| std::io::Error::other(format!("invalid POOL_MAX_SIZE: {e}")))
}

fn token_ttl() -> std::io::Result<chrono::Duration> {
    let Ok(raw) = env::var("TOKEN_TTL_DAYS") else {
        return Ok(backend::outbound::auth::DEFAULT_TOKEN_TTL);
    };
    raw.parse::<i64>()
        .map(chrono::Duration::days)
        .map_err(|e| std::io::Error::other(format!("invalid TOKEN_TTL_DAYS: {e}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let mut config = ServerConfig::new(parse_bind_addr()?, token_secret()?)
        .with_token_ttl(token_ttl()?);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        let pool = DbPool::new(pool_config(database_url)?)
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL not set; serving with fixture adapters");
    }

    server::create_server(config)?.await
}
