use std::fmt;

/// Fixed-threshold temperature alert. Every call re-evaluates; nothing is
/// suppressed between cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureAlert {
    threshold_c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertNotice {
    pub location: String,
    pub temperature_c: f64,
    pub threshold_c: f64,
}

impl fmt::Display for AlertNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alert! Current temperature {}°C in {} exceeds the threshold of {}°C.",
            self.temperature_c, self.location, self.threshold_c
        )
    }
}

impl TemperatureAlert {
    pub fn new(threshold_c: f64) -> Self {
        Self { threshold_c }
    }

    /// Returns a notice iff `temperature_c` is strictly above the threshold.
    pub fn check(&self, location: &str, temperature_c: f64) -> Option<AlertNotice> {
        (temperature_c > self.threshold_c).then(|| AlertNotice {
            location: location.to_string(),
            temperature_c,
            threshold_c: self.threshold_c,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_above_threshold() {
        let alert = TemperatureAlert::new(35.0);
        let notice = alert.check("Chennai", 36.0).unwrap();

        assert_eq!(
            notice.to_string(),
            "Alert! Current temperature 36°C in Chennai exceeds the threshold of 35°C."
        );
    }

    #[test]
    fn threshold_itself_does_not_fire() {
        let alert = TemperatureAlert::new(35.0);

        assert!(alert.check("Chennai", 35.0).is_none());
        assert!(alert.check("Chennai", 34.9).is_none());
    }

    #[test]
    fn repeated_checks_fire_every_time() {
        let alert = TemperatureAlert::new(35.0);

        assert!(alert.check("Mumbai", 38.0).is_some());
        assert!(alert.check("Mumbai", 38.0).is_some());
    }
}
