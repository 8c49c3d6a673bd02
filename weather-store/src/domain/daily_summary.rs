use anyhow::Context;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

/// On-disk format of the `daily_weather.date` primary key.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Aggregated record for one calendar date. At most one row per date exists
/// in `daily_weather`; writing a summary for a stored date replaces it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailySummary {
    pub date: Date,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub dominant_condition: String,
}

pub fn format_date(date: Date) -> anyhow::Result<String> {
    date.format(DATE_FORMAT)
        .with_context(|| format!("failed to format date {date}"))
}

pub fn parse_date(s: &str) -> anyhow::Result<Date> {
    Date::parse(s.trim(), DATE_FORMAT).with_context(|| format!("invalid stored date '{s}'"))
}
