use std::fmt::Write as _;

use weather_store::Reading;

/// Most recent fetch result per location, in configured order.
///
/// Owned by the scheduler; the fetch action replaces it wholesale and the
/// print action only reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestReadings {
    entries: Vec<(String, Option<Reading>)>,
}

impl LatestReadings {
    pub fn record(&mut self, location: &str, reading: Option<Reading>) {
        match self.entries.iter_mut().find(|(l, _)| l == location) {
            Some(entry) => entry.1 = reading,
            None => self.entries.push((location.to_string(), reading)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Latest Weather Data:\n");
        for (location, reading) in &self.entries {
            // Writing into a String cannot fail.
            let _ = match reading {
                Some(r) => writeln!(out, "{location}: {}°C, Condition: {}", r.temperature_c, r.condition),
                None => writeln!(out, "{location}: No data available."),
            };
        }
        out
    }
}
