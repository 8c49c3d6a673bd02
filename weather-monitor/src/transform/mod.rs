use std::collections::BTreeMap;

use time::Date;
use weather_store::{DailySummary, Reading};

/// Roll one cycle's readings up into one summary per calendar date.
///
/// Summaries come out ordered by date. An empty input yields no summaries.
pub fn aggregate_daily(readings: &[Reading]) -> Vec<DailySummary> {
    let mut by_date: BTreeMap<Date, Vec<&Reading>> = BTreeMap::new();
    for r in readings {
        by_date.entry(r.date()).or_default().push(r);
    }

    by_date
        .into_iter()
        .filter_map(|(date, day)| summarize(date, &day))
        .collect()
}

fn summarize(date: Date, day: &[&Reading]) -> Option<DailySummary> {
    let dominant_condition = dominant_condition(day)?;
    let temps = day.iter().map(|r| r.temperature_c);

    let sum: f64 = temps.clone().sum();
    let max_temp = temps.clone().fold(f64::NEG_INFINITY, f64::max);
    let min_temp = temps.fold(f64::INFINITY, f64::min);

    Some(DailySummary {
        date,
        avg_temp: sum / day.len() as f64,
        max_temp,
        min_temp,
        dominant_condition,
    })
}

/// Most frequent condition label. Ties go to the label seen first.
pub fn dominant_condition(day: &[&Reading]) -> Option<String> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for r in day {
        match tally.iter_mut().find(|(label, _)| *label == r.condition) {
            Some((_, count)) => *count += 1,
            None => tally.push((r.condition.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in tally {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((label, count));
        }
    }

    best.map(|(label, _)| label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{macros::datetime, OffsetDateTime};

    fn reading_at(observed_at: OffsetDateTime, temperature_c: f64, condition: &str) -> Reading {
        Reading {
            location: "Mumbai".to_string(),
            temperature_c,
            condition: condition.to_string(),
            description: None,
            humidity_pct: None,
            observed_at,
        }
    }

    fn reading(temperature_c: f64, condition: &str) -> Reading {
        reading_at(datetime!(2024-06-01 12:00:00 UTC), temperature_c, condition)
    }

    #[test]
    fn average_is_arithmetic_mean() {
        let out = aggregate_daily(&[reading(30.0, "Clear"), reading(34.0, "Clear")]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].avg_temp, 32.0);
    }

    #[test]
    fn extrema_match_inputs() {
        let out = aggregate_daily(&[
            reading(30.0, "Clear"),
            reading(38.0, "Rain"),
            reading(-2.5, "Snow"),
            reading(34.0, "Clear"),
        ]);

        assert_eq!(out[0].max_temp, 38.0);
        assert_eq!(out[0].min_temp, -2.5);
    }

    #[test]
    fn dominant_is_strictly_most_frequent() {
        let out = aggregate_daily(&[
            reading(30.0, "Rain"),
            reading(34.0, "Clear"),
            reading(38.0, "Clear"),
        ]);

        assert_eq!(out[0].dominant_condition, "Clear");
        assert_eq!(out[0].avg_temp, 34.0);
    }

    // Ties are resolved deterministically in favour of the label that appears
    // first in the cycle's readings.
    #[test]
    fn dominant_tie_goes_to_first_seen_label() {
        let out = aggregate_daily(&[
            reading(30.0, "Haze"),
            reading(31.0, "Clouds"),
            reading(32.0, "Clouds"),
            reading(33.0, "Haze"),
        ]);
        assert_eq!(out[0].dominant_condition, "Haze");

        let out = aggregate_daily(&[reading(30.0, "Clouds"), reading(31.0, "Haze")]);
        assert_eq!(out[0].dominant_condition, "Clouds");
    }

    #[test]
    fn readings_split_across_dates_yield_one_summary_each() {
        let out = aggregate_daily(&[
            reading_at(datetime!(2024-06-02 00:00:01 UTC), 20.0, "Rain"),
            reading_at(datetime!(2024-06-01 23:59:59 UTC), 30.0, "Clear"),
            reading_at(datetime!(2024-06-02 00:00:02 UTC), 24.0, "Rain"),
        ]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].date, time::macros::date!(2024 - 06 - 01));
        assert_eq!(out[0].avg_temp, 30.0);
        assert_eq!(out[1].avg_temp, 22.0);
        assert_eq!(out[1].dominant_condition, "Rain");
    }

    #[test]
    fn no_readings_no_summaries() {
        assert!(aggregate_daily(&[]).is_empty());
    }
}
