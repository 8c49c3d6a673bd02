use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::domain::{format_date, parse_date, DailySummary};

#[derive(Debug, sqlx::FromRow)]
struct DailyWeatherRow {
    date: String,
    avg_temp: f64,
    max_temp: f64,
    min_temp: f64,
    dominant_condition: String,
}

impl TryFrom<DailyWeatherRow> for DailySummary {
    type Error = anyhow::Error;

    fn try_from(row: DailyWeatherRow) -> Result<Self> {
        Ok(DailySummary {
            date: parse_date(&row.date)?,
            avg_temp: row.avg_temp,
            max_temp: row.max_temp,
            min_temp: row.min_temp,
            dominant_condition: row.dominant_condition,
        })
    }
}

/// Create `daily_weather` if it does not exist yet. Safe to call on every start.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS daily_weather (
            date TEXT PRIMARY KEY,
            avg_temp REAL,
            max_temp REAL,
            min_temp REAL,
            dominant_condition TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert the summary, replacing any row already stored for its date.
pub async fn upsert_daily_summary(pool: &SqlitePool, summary: &DailySummary) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO daily_weather (date, avg_temp, max_temp, min_temp, dominant_condition)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(format_date(summary.date)?)
    .bind(summary.avg_temp)
    .bind(summary.max_temp)
    .bind(summary.min_temp)
    .bind(&summary.dominant_condition)
    .execute(pool)
    .await
    .with_context(|| format!("failed to upsert daily summary for {}", summary.date))?;

    Ok(())
}

/// Every stored summary, oldest date first.
pub async fn all_daily_summaries(pool: &SqlitePool) -> Result<Vec<DailySummary>> {
    let rows = sqlx::query_as::<_, DailyWeatherRow>(
        r#"
        SELECT
            date,
            avg_temp,
            max_temp,
            min_temp,
            dominant_condition
        FROM daily_weather
        ORDER BY date
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(DailySummary::try_from).collect()
}
