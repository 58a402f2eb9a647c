//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CYLO_STATE_FILE` - JSON file the cart, wishlist and session are saved to
//! - `CYLO_START_PATH` - Initial location (default: `/`); must be a known route
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g. `staging`)
//! - `SENTRY_SAMPLE_RATE` - Fraction of errors sent to Sentry (default: 1.0)

use std::path::PathBuf;

use thiserror::Error;

use crate::routes::Route;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Where the persistence adapter keeps state, if anywhere
    pub state_file: Option<PathBuf>,
    /// Location the router starts at
    pub start_path: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            state_file: None,
            start_path: "/".to_string(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let start_path = get("CYLO_START_PATH").unwrap_or_else(|| "/".to_string());
        if Route::parse(&start_path).is_none() {
            return Err(ConfigError::InvalidEnvVar(
                "CYLO_START_PATH".to_string(),
                format!("{start_path} is not a known route"),
            ));
        }

        let sentry_sample_rate = match get("SENTRY_SAMPLE_RATE") {
            Some(raw) => parse_sample_rate(&raw)?,
            None => 1.0,
        };

        Ok(Self {
            state_file: get("CYLO_STATE_FILE").map(PathBuf::from),
            start_path,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }
}

/// Parse a sampling fraction in `0.0..=1.0`.
fn parse_sample_rate(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), reason);

    let rate = raw
        .trim()
        .parse::<f32>()
        .map_err(|e| invalid(e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(invalid(format!("{rate} is outside 0.0..=1.0")));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load(&[]).unwrap(), StorefrontConfig::default());
    }

    #[test]
    fn test_reads_values() {
        let config = load(&[
            ("CYLO_STATE_FILE", "/tmp/cylo.json"),
            ("CYLO_START_PATH", "/shop"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.state_file, Some(PathBuf::from("/tmp/cylo.json")));
        assert_eq!(config.start_path, "/shop");
        assert!(config.sentry_dsn.is_some());
        assert!((config.sentry_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = load(&[("CYLO_STATE_FILE", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert!(config.state_file.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_unknown_start_path() {
        let err = load(&[("CYLO_START_PATH", "/checkout")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CYLO_START_PATH"));
    }

    #[test]
    fn test_sample_rate_bounds() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(load(&[("SENTRY_SAMPLE_RATE", "lots")]).is_err());
        assert!(load(&[("SENTRY_SAMPLE_RATE", "0")]).is_ok());
    }
}
