//! CLI settings loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional. A `.env` file in the working directory is loaded first.
//!
//! - `VD_LOG_FORMAT` - `text` or `json` (default: text)
//! - `VD_EMISSION_MODE` - `best-tier` or `every-qualifying-tier` (default: best-tier)
//! - `VD_CURRENCY` - currency for `preview` prices (default: USD)
//!
//! Command-line flags take precedence over these.

use core::str::FromStr;

use thiserror::Error;
use volume_discount_core::CurrencyCode;
use volume_discount_function::EmissionMode;

const LOG_FORMAT: &str = "VD_LOG_FORMAT";
const EMISSION_MODE: &str = "VD_EMISSION_MODE";
const CURRENCY: &str = "VD_CURRENCY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?} (expected text or json)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CliConfig {
    pub log_format: LogFormat,
    pub emission: EmissionMode,
    pub currency: CurrencyCode,
}

impl CliConfig {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`, which returns a variable's value if set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unrecognized value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            log_format: parse_optional(&lookup, LOG_FORMAT)?.unwrap_or_default(),
            emission: parse_optional(&lookup, EMISSION_MODE)?.unwrap_or_default(),
            currency: parse_optional(&lookup, CURRENCY)?.unwrap_or_default(),
        })
    }
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load(&[]).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_all_set() {
        let config = load(&[
            ("VD_LOG_FORMAT", "JSON"),
            ("VD_EMISSION_MODE", "every-qualifying-tier"),
            ("VD_CURRENCY", "eur"),
        ])
        .unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.emission, EmissionMode::EveryQualifyingTier);
        assert_eq!(config.currency, CurrencyCode::EUR);
    }

    #[test]
    fn test_blank_is_default() {
        assert_eq!(load(&[("VD_CURRENCY", " ")]).unwrap().currency, CurrencyCode::USD);
    }

    #[test]
    fn test_invalid_value() {
        let err = load(&[("VD_EMISSION_MODE", "all")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "VD_EMISSION_MODE"));

        let err = load(&[("VD_LOG_FORMAT", "yaml")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "VD_LOG_FORMAT"));
    }
}
