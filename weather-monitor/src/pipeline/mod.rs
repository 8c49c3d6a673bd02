use weather_store::{DailySummary, Reading};

use crate::{alert::TemperatureAlert, display::LatestReadings, transform};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("source error: {0}")]
    Source(String),
    #[error("no data for {location}: {reason}")]
    Unavailable { location: String, reason: String },
    #[error("sink error: {0}")]
    Sink(String),
}

/// Produces the current reading for a named location.
#[async_trait::async_trait]
pub trait Source: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Reading, PipelineError>;
}

/// Durable destination for daily summaries.
#[async_trait::async_trait]
pub trait Sink: Send + Sync {
    async fn write(&self, summary: &DailySummary) -> Result<(), PipelineError>;

    async fn close(&self);
}

/// What one fetch cycle did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub readings: usize,
    pub unavailable: usize,
    pub alerts: usize,
    pub summaries: Vec<DailySummary>,
}

/// One fetch cycle: fetch every location, alert, roll up, persist.
pub struct Pipeline<S, K> {
    pub source: S,
    pub alert: TemperatureAlert,
    pub sink: K,
    pub locations: Vec<String>,
}

impl<S, K> Pipeline<S, K>
where
    S: Source,
    K: Sink,
{
    pub fn new(source: S, alert: TemperatureAlert, sink: K, locations: Vec<String>) -> Self {
        Self {
            source,
            alert,
            sink,
            locations,
        }
    }

    /// Run one cycle, replacing `latest` with this cycle's results.
    ///
    /// A location that fails to fetch is recorded as having no data and the
    /// cycle moves on. Sink failures abort the cycle.
    pub async fn run_cycle(&self, latest: &mut LatestReadings) -> Result<CycleReport, PipelineError> {
        let mut report = CycleReport::default();
        let mut readings = Vec::with_capacity(self.locations.len());
        let mut fresh = LatestReadings::default();

        for location in &self.locations {
            metrics::counter!("weather_fetch_requests_total").increment(1);

            let reading = match self.source.fetch(location).await {
                Ok(reading) => reading,
                Err(e) => {
                    metrics::counter!("weather_fetch_failures_total").increment(1);
                    tracing::warn!(location = %location, error = %e, "skipping location this cycle");
                    fresh.record(location, None);
                    report.unavailable += 1;
                    continue;
                }
            };

            if let Some(notice) = self.alert.check(location, reading.temperature_c) {
                metrics::counter!("weather_alerts_total").increment(1);
                tracing::warn!(location = %location, temperature_c = reading.temperature_c, "{notice}");
                report.alerts += 1;
            }

            fresh.record(location, Some(reading.clone()));
            readings.push(reading);
        }

        *latest = fresh;
        report.readings = readings.len();

        for summary in transform::aggregate_daily(&readings) {
            self.sink.write(&summary).await?;
            metrics::counter!("daily_summaries_upserted_total").increment(1);
            tracing::info!(
                date = %summary.date,
                avg_temp = summary.avg_temp,
                max_temp = summary.max_temp,
                min_temp = summary.min_temp,
                dominant_condition = %summary.dominant_condition,
                "daily summary stored"
            );
            report.summaries.push(summary);
        }

        metrics::counter!("weather_fetch_cycles_total").increment(1);
        Ok(report)
    }
}
