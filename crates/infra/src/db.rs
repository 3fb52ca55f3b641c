//! Connection pool setup.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Open a Postgres pool. Store calls are bounded by the acquire timeout.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(300))
        .connect(database_url)
        .await
}
