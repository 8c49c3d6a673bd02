use anyhow::Context;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};

pub const CONFIG_PATH_ENV: &str = "WEATHER_MONITOR_CONFIG";
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("weather_data.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub temperature_threshold_c: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            temperature_threshold_c: 35.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub poll_interval_secs: u64,
    pub fetch_interval_secs: u64,
    pub print_interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 1,
            fetch_interval_secs: 20,
            print_interval_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub locations: Vec<String>,
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub alert: AlertConfig,
    pub schedule: ScheduleConfig,
    pub metrics: Option<MetricsConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locations: vec!["Mumbai".to_string(), "Chennai".to_string(), "Bangalore".to_string()],
            api: ApiConfig::default(),
            store: StoreConfig::default(),
            alert: AlertConfig::default(),
            schedule: ScheduleConfig::default(),
            metrics: None,
        }
    }
}

impl AppConfig {
    /// Built-in defaults, overridden by the TOML file named in
    /// `WEATHER_MONITOR_CONFIG` (if set) and by `OPENWEATHER_API_KEY`.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let mut cfg = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(key) = env::var(API_KEY_ENV) {
            cfg.api.api_key = key;
        }

        if cfg.api.api_key.is_empty() {
            tracing::warn!("no API key configured; set {API_KEY_ENV} or api.api_key");
        }

        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| format!("failed to read config '{path}'"))?;
        Self::from_toml(&contents).with_context(|| format!("invalid config '{path}'"))
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.locations.is_empty() {
            anyhow::bail!("at least one location must be configured");
        }
        let s = &self.schedule;
        if s.poll_interval_secs == 0 || s.fetch_interval_secs == 0 || s.print_interval_secs == 0 {
            anyhow::bail!("schedule intervals must be non-zero");
        }
        Ok(())
    }
}
