//! Session configuration, read from `LOGO_STUDIO_*` environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::domain::ConfigError;

pub const ENV_ASSUME_READY_WITHOUT_HOST: &str = "LOGO_STUDIO_ASSUME_READY_WITHOUT_HOST";
pub const ENV_GENERATION_TIMEOUT_SECS: &str = "LOGO_STUDIO_GENERATION_TIMEOUT_SECS";
pub const ENV_LOG_FORMAT: &str = "LOGO_STUDIO_LOG_FORMAT";
pub const ENV_LOG_LEVEL: &str = "LOGO_STUDIO_LOG_LEVEL";

/// Log line format for [`init_tracing`](crate::telemetry::init_tracing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logo Studio configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Gate state when the host has no credential-selection capability.
    pub assume_ready_without_host: bool,
    /// Upper bound on a single generation call. `None` waits indefinitely.
    pub generation_timeout: Option<Duration>,
    pub log_format: LogFormat,
    /// Default verbosity when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            assume_ready_without_host: true,
            generation_timeout: None,
            log_format: LogFormat::Text,
            log_level: "info".to_string(),
        }
    }
}

impl StudioConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys keep their
    /// defaults; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = StudioConfig::default();

        if let Some(raw) = get(ENV_ASSUME_READY_WITHOUT_HOST) {
            config.assume_ready_without_host = parse_bool(ENV_ASSUME_READY_WITHOUT_HOST, &raw)?;
        }

        if let Some(raw) = get(ENV_GENERATION_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                invalid(
                    ENV_GENERATION_TIMEOUT_SECS,
                    &raw,
                    "expected a whole number of seconds",
                )
            })?;
            if secs == 0 {
                return Err(invalid(
                    ENV_GENERATION_TIMEOUT_SECS,
                    &raw,
                    "must be greater than zero; unset it to disable the timeout",
                ));
            }
            config.generation_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(raw) = get(ENV_LOG_FORMAT) {
            config.log_format = match raw.to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(invalid(ENV_LOG_FORMAT, &raw, "expected `text` or `json`")),
            };
        }

        if let Some(raw) = get(ENV_LOG_LEVEL) {
            raw.parse::<Level>().map_err(|_| {
                invalid(ENV_LOG_LEVEL, &raw, "expected trace, debug, info, warn or error")
            })?;
            config.log_level = raw.to_ascii_lowercase();
        }

        Ok(config)
    }

    /// Set the generation timeout
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = Some(timeout);
        self
    }

    pub fn with_assume_ready_without_host(mut self, assume_ready: bool) -> Self {
        self.assume_ready_without_host = assume_ready;
        self
    }

    /// The configured level, falling back to `INFO`.
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw, "expected a boolean")),
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = StudioConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StudioConfig::default());
        assert!(config.assume_ready_without_host);
        assert!(config.generation_timeout.is_none());
        assert_eq!(config.level(), Level::INFO);
    }

    #[test]
    fn test_reads_all_keys() {
        let config = StudioConfig::from_lookup(lookup(&[
            (ENV_ASSUME_READY_WITHOUT_HOST, "false"),
            (ENV_GENERATION_TIMEOUT_SECS, "90"),
            (ENV_LOG_FORMAT, "JSON"),
            (ENV_LOG_LEVEL, "debug"),
        ]))
        .unwrap();

        assert!(!config.assume_ready_without_host);
        assert_eq!(config.generation_timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.level(), Level::DEBUG);
    }

    #[test]
    fn test_blank_value_keeps_default() {
        let config =
            StudioConfig::from_lookup(lookup(&[(ENV_GENERATION_TIMEOUT_SECS, "  ")])).unwrap();
        assert!(config.generation_timeout.is_none());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = StudioConfig::from_lookup(lookup(&[(ENV_GENERATION_TIMEOUT_SECS, "0")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_GENERATION_TIMEOUT_SECS));
    }

    #[test]
    fn test_rejects_bad_values() {
        for (key, value) in [
            (ENV_GENERATION_TIMEOUT_SECS, "1m"),
            (ENV_ASSUME_READY_WITHOUT_HOST, "maybe"),
            (ENV_LOG_FORMAT, "xml"),
            (ENV_LOG_LEVEL, "loud"),
        ] {
            let result = StudioConfig::from_lookup(lookup(&[(key, value)]));
            assert!(result.is_err(), "{key}={value} should be rejected");
        }
    }
}
