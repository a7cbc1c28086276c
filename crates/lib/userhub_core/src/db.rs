//! Database pool construction.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Default acquire timeout for pool connections.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect a PostgreSQL pool.
///
/// The pool is constructed once at startup and handed to the repositories;
/// its lifecycle is owned by the process entry point.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}
