use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use time::OffsetDateTime;
use weather_store::Reading;

use crate::{
    config::ApiConfig,
    pipeline::{PipelineError, Source},
};

/// Temperatures are requested in Celsius.
const UNITS: &str = "metric";

/// OpenWeatherMap "current weather" payload; only the fields we use.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub name: Option<String>,
    pub dt: Option<i64>,
    pub main: MainBlock,
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionBlock {
    pub main: String,
    pub description: Option<String>,
}

impl CurrentConditions {
    fn into_reading(self, location: &str, observed_at: OffsetDateTime) -> Result<Reading, PipelineError> {
        let primary = self.weather.into_iter().next().ok_or_else(|| PipelineError::Unavailable {
            location: location.to_string(),
            reason: "payload has no weather conditions".to_string(),
        })?;

        Ok(Reading {
            location: location.to_string(),
            temperature_c: self.main.temp,
            condition: primary.main,
            description: primary.description,
            humidity_pct: self.main.humidity,
            observed_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherSource {
    pub fn new(cfg: &ApiConfig) -> Result<Self, PipelineError> {
        Self::with_timeout(&cfg.base_url, &cfg.api_key, cfg.timeout())
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Source(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// One GET for `location`. Any failure means no data this cycle.
    pub async fn current_conditions(&self, location: &str) -> Result<CurrentConditions, PipelineError> {
        let unavailable = |reason: String| PipelineError::Unavailable {
            location: location.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", location), ("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await
            // The request URL carries the API key; keep it out of the error text.
            .map_err(|e| unavailable(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| unavailable(format!("failed to read body: {}", e.without_url())))?;

        if !status.is_success() {
            tracing::warn!(
                location,
                status = status.as_u16(),
                "Error fetching data for {location}: {status} - {body}"
            );
            return Err(unavailable(format!("status {status}")));
        }

        serde_json::from_str(&body).map_err(|e| unavailable(format!("invalid payload: {e}")))
    }
}

#[async_trait::async_trait]
impl Source for OpenWeatherSource {
    async fn fetch(&self, location: &str) -> Result<Reading, PipelineError> {
        let conditions = self.current_conditions(location).await?;
        tracing::debug!(
            location,
            provider_name = conditions.name.as_deref().unwrap_or(""),
            provider_dt = conditions.dt,
            "fetched current conditions"
        );
        conditions.into_reading(location, local_now())
    }
}

/// Local wall-clock time, falling back to UTC when the offset is unknown.
fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
