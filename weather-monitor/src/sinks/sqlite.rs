use std::path::Path;

use sqlx::SqlitePool;
use weather_store::{db, DailySummary};

use crate::pipeline::{PipelineError, Sink};

/// Writes daily summaries into the `daily_weather` table.
///
/// Holds the process's only store connection; `close` releases it.
pub struct SqliteSummarySink {
    pool: SqlitePool,
}

impl SqliteSummarySink {
    /// Open the database file and make sure the schema exists.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let pool = db::connect(path).await.map_err(|e| PipelineError::Sink(format!("{e:#}")))?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, PipelineError> {
        db::create_schema(&pool)
            .await
            .map_err(|e| PipelineError::Sink(format!("failed to create schema: {e:#}")))?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl Sink for SqliteSummarySink {
    async fn write(&self, summary: &DailySummary) -> Result<(), PipelineError> {
        db::upsert_daily_summary(&self.pool, summary).await.map_err(|e| {
            tracing::error!(error = %e, date = %summary.date, "failed to store daily summary");
            PipelineError::Sink(format!("{e:#}"))
        })
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("store connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[tokio::test]
    async fn write_goes_through_to_the_table() {
        let sink = SqliteSummarySink::from_pool(db::connect_in_memory().await.unwrap())
            .await
            .unwrap();

        let summary = DailySummary {
            date: date!(2024 - 06 - 01),
            avg_temp: 34.0,
            max_temp: 38.0,
            min_temp: 30.0,
            dominant_condition: "Clear".to_string(),
        };
        sink.write(&summary).await.unwrap();

        let rows = db::all_daily_summaries(sink.pool()).await.unwrap();
        assert_eq!(rows, vec![summary]);
    }

    #[tokio::test]
    async fn write_after_close_fails() {
        let sink = SqliteSummarySink::from_pool(db::connect_in_memory().await.unwrap())
            .await
            .unwrap();
        sink.close().await;

        let summary = DailySummary {
            date: date!(2024 - 06 - 01),
            avg_temp: 1.0,
            max_temp: 1.0,
            min_temp: 1.0,
            dominant_condition: "Snow".to_string(),
        };
        match sink.write(&summary).await {
            Err(PipelineError::Sink(msg)) => {
                assert!(msg.contains("failed to upsert daily summary for 2024-06-01"), "{msg}");
                assert!(msg.contains("closed"), "underlying cause missing: {msg}");
            }
            other => panic!("expected sink error, got {other:?}"),
        }
    }
}
