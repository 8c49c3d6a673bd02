pub mod daily_weather_queries;

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use daily_weather_queries::{all_daily_summaries, create_schema, upsert_daily_summary};

/// Open (creating if needed) the SQLite file at `path`.
///
/// The pool is capped at a single connection: the monitor has one writer and
/// holds that connection for the life of the process.
pub async fn connect<P: AsRef<Path>>(path: P) -> Result<SqlitePool> {
    let path = path.as_ref();
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open sqlite database '{}'", path.display()))?;

    Ok(pool)
}

/// Private in-memory database, used by tests.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    Ok(pool)
}
