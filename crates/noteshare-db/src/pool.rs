//! Connection pool setup.
//!
//! Every Postgres connection in the system comes out of a pool built here,
//! so sizing and timeout policy have a single home.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use noteshare_core::{Error, Result};

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default acquire timeout in seconds.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Pool sizing and timeout settings.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections the pool will open.
    pub max_connections: u32,
    /// How long an acquire waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of connections.
    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Set the acquire timeout.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Connect to `database_url` with default settings.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    create_pool_with_config(database_url, PoolConfig::default()).await
}

/// Connect to `database_url` with explicit settings.
pub async fn create_pool_with_config(database_url: &str, config: PoolConfig) -> Result<PgPool> {
    let start = Instant::now();
    let pool = config
        .pool_options()
        .connect(database_url)
        .await
        .map_err(Error::Database)?;
    log_established(&pool, start);
    Ok(pool)
}

/// Connect with pre-built connect options. Test harnesses use this to pin
/// a per-schema `search_path` onto every pooled connection.
pub async fn create_pool_with_connect_options(
    options: PgConnectOptions,
    config: PoolConfig,
) -> Result<PgPool> {
    let start = Instant::now();
    let pool = config
        .pool_options()
        .connect_with(options)
        .await
        .map_err(Error::Database)?;
    log_established(&pool, start);
    Ok(pool)
}

fn log_established(pool: &PgPool, start: Instant) {
    info!(
        subsystem = "db",
        component = "pool",
        op = "establish",
        pool_size = pool.size(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Database connection pool established"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PoolConfig::default();
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(
            config.acquire_timeout,
            Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_config_builder() {
        let config = PoolConfig::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(5));
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }
}
