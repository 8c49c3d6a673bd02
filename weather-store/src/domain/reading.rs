use time::{Date, OffsetDateTime};

/// One location's instantaneous sample, as returned by the weather provider.
///
/// Readings are transient: they feed alerting and the daily rollup and are
/// never persisted individually.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    pub location: String,
    pub temperature_c: f64,
    pub condition: String,
    pub description: Option<String>,
    pub humidity_pct: Option<f64>,
    pub observed_at: OffsetDateTime,
}

impl Reading {
    /// Calendar date the reading is bucketed under.
    pub fn date(&self) -> Date {
        self.observed_at.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn date_uses_the_offset_of_the_timestamp() {
        let reading = Reading {
            location: "Mumbai".to_string(),
            temperature_c: 31.0,
            condition: "Clear".to_string(),
            description: None,
            humidity_pct: None,
            observed_at: datetime!(2024-05-01 23:30:00 +05:30),
        };

        assert_eq!(reading.date(), date!(2024 - 05 - 01));
    }
}
