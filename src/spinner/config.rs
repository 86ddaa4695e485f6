//! Spinner settings and their environment overrides.
use std::time::Duration;

use super::SpinnerError;

/// Classic teletype spinner.
pub const DEFAULT_FRAMES: [&str; 4] = ["\\", "|", "/", "-"];

/// Seconds between two frames unless configured otherwise.
pub const DEFAULT_INTERVAL_SECS: f64 = 0.175;

/// Probability used by `Spinner::random` when none is given.
pub const DEFAULT_RANDOM_PROBABILITY: u8 = 25;

/// Upper bound (exclusive) of a jittered interval, in seconds.
pub const MAX_JITTER_SECS: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerConfig {
    pub frames: Vec<String>,
    pub interval: Duration,
    /// Percent chance per tick of picking a new random interval.
    pub jitter_probability: u8,
    /// Blank out the last frame when the spinner stops.
    pub clear_on_stop: bool,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        SpinnerConfig {
            frames: DEFAULT_FRAMES.iter().map(|f| f.to_string()).collect(),
            interval: Duration::from_secs_f64(DEFAULT_INTERVAL_SECS),
            jitter_probability: 0,
            clear_on_stop: false,
        }
    }
}

impl SpinnerConfig {
    /// Defaults overlaid with `WHIRL_FRAMES`, `WHIRL_INTERVAL`, `WHIRL_JITTER` and `WHIRL_CLEAR`.
    pub fn from_env() -> Result<Self, SpinnerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, SpinnerError> {
        let mut config = SpinnerConfig::default();

        if let Some(value) = lookup("WHIRL_FRAMES") {
            let frames: Vec<String> = value.split_whitespace().map(str::to_string).collect();
            if frames.is_empty() {
                return Err(SpinnerError::InvalidEnv {
                    key: "WHIRL_FRAMES",
                    value,
                });
            }
            config.frames = frames;
        }

        if let Some(value) = lookup("WHIRL_INTERVAL") {
            let interval = value
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|secs| interval_from_secs(secs).ok());
            let Some(interval) = interval else {
                return Err(SpinnerError::InvalidEnv {
                    key: "WHIRL_INTERVAL",
                    value,
                });
            };
            config.interval = interval;
        }

        if let Some(value) = lookup("WHIRL_JITTER") {
            match value.trim().parse::<u8>() {
                Ok(pct) if pct <= 100 => config.jitter_probability = pct,
                _ => {
                    return Err(SpinnerError::InvalidEnv {
                        key: "WHIRL_JITTER",
                        value,
                    });
                }
            }
        }

        if let Some(value) = lookup("WHIRL_CLEAR") {
            let v = value.trim().to_lowercase();
            config.clear_on_stop = matches!(v.as_str(), "1" | "true" | "yes" | "on");
        }

        Ok(config)
    }

    /// Check every field, so a bad config never reaches a running spinner.
    pub fn validate(&self) -> Result<(), SpinnerError> {
        if self.frames.is_empty() {
            return Err(SpinnerError::EmptyFrames);
        }
        if self.jitter_probability > 100 {
            return Err(SpinnerError::JitterOutOfRange(self.jitter_probability));
        }
        Ok(())
    }
}

/// Convert seconds into a timer interval, rejecting negative, non-finite and oversized values.
pub fn interval_from_secs(secs: f64) -> Result<Duration, SpinnerError> {
    Duration::try_from_secs_f64(secs).map_err(|_| SpinnerError::InvalidInterval(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = SpinnerConfig::from_lookup(lookup_in(&[
            ("WHIRL_FRAMES", ".  o O"),
            ("WHIRL_INTERVAL", "0.05"),
            ("WHIRL_JITTER", "40"),
            ("WHIRL_CLEAR", "yes"),
        ]))
        .unwrap();
        assert_eq!(config.frames, vec![".", "o", "O"]);
        assert_eq!(config.interval, Duration::from_millis(50));
        assert_eq!(config.jitter_probability, 40);
        assert!(config.clear_on_stop);
    }

    #[test]
    fn missing_env_keeps_defaults() {
        let config = SpinnerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SpinnerConfig::default());
    }

    #[test]
    fn bad_env_values_are_reported() {
        for (key, value) in [
            ("WHIRL_FRAMES", "   "),
            ("WHIRL_INTERVAL", "-1"),
            ("WHIRL_INTERVAL", "soon"),
            ("WHIRL_INTERVAL", "1e30"),
            ("WHIRL_JITTER", "101"),
        ] {
            let err = SpinnerConfig::from_lookup(lookup_in(&[(key, value)])).unwrap_err();
            assert!(
                matches!(&err, SpinnerError::InvalidEnv { key: k, .. } if *k == key),
                "{key}={value}: {err}"
            );
        }
    }

    #[test]
    fn interval_rejects_nan_and_negative() {
        assert!(interval_from_secs(-0.1).is_err());
        assert!(interval_from_secs(f64::NAN).is_err());
        assert!(interval_from_secs(f64::INFINITY).is_err());
        assert!(matches!(
            interval_from_secs(1e30),
            Err(SpinnerError::InvalidInterval(_))
        ));
        assert_eq!(interval_from_secs(0.0).unwrap(), Duration::ZERO);
    }
}
