//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};

use crate::generator::GeneratorConfig;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Generator seed; random when unset
    pub data_seed: Option<u64>,

    pub user_count: u32,

    pub product_count: u32,

    /// First day of the generated sales history
    pub data_start_date: NaiveDate,

    /// Last day of the generated sales history (defaults to today)
    pub data_end_date: NaiveDate,

    /// Days of history fed to the forecaster
    pub history_days: u32,

    /// Days projected when a request does not say
    pub forecast_days: u32,

    /// Length of the date range used when a request omits start/end
    pub default_range_days: u32,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("PORT", "3000")?;
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let data_seed = match env::var("DATA_SEED") {
            Ok(raw) => Some(
                raw.parse()
                    .map_err(|_| ConfigError::InvalidValue("DATA_SEED"))?,
            ),
            Err(_) => None,
        };

        let data_start_date = parse_date("DATA_START_DATE", Some("2023-01-01"))?
            .ok_or(ConfigError::MissingEnv("DATA_START_DATE"))?;
        let data_end_date =
            parse_date("DATA_END_DATE", None)?.unwrap_or_else(|| Utc::now().date_naive());

        let log_format = match env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .as_str()
        {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        Ok(Self {
            host,
            port,
            environment,
            data_seed,
            user_count: parse_var("USER_COUNT", "100")?,
            product_count: parse_var("PRODUCT_COUNT", "100")?,
            data_start_date,
            data_end_date,
            history_days: parse_var("HISTORY_DAYS", "90")?,
            forecast_days: parse_var("FORECAST_DAYS", "30")?,
            default_range_days: parse_var("DEFAULT_RANGE_DAYS", "30")?,
            log_format,
        })
    }

    /// Parameters for building the synthetic store
    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            user_count: self.user_count,
            product_count: self.product_count,
            start_date: self.data_start_date,
            end_date: self.data_end_date,
            seed: self.data_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let generator = GeneratorConfig::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: "development".to_string(),
            data_seed: generator.seed,
            user_count: generator.user_count,
            product_count: generator.product_count,
            data_start_date: generator.start_date,
            data_end_date: generator.end_date,
            history_days: 90,
            forecast_days: 30,
            default_range_days: 30,
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name))
}

fn parse_date(name: &'static str, default: Option<&str>) -> Result<Option<NaiveDate>, ConfigError> {
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(_) => match default {
            Some(default) => default.to_string(),
            None => return Ok(None),
        },
    };
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue(name))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_env_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.history_days, 90);
        assert_eq!(config.forecast_days, 30);
        assert_eq!(
            config.data_start_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_generator_config_carries_seed() {
        let config = Config {
            data_seed: Some(42),
            user_count: 10,
            ..Config::default()
        };
        let generator = config.generator();
        assert_eq!(generator.seed, Some(42));
        assert_eq!(generator.user_count, 10);
    }
}
