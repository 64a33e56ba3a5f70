//! Configuration management for the contact directory server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is loaded silently if present so stdout stays reserved for MCP traffic.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the contact directory server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional JSON snapshot file backing the record store
    pub data_file: Option<PathBuf>,

    /// Seed the sample contacts when the store starts empty (default: true)
    pub seed_sample_contacts: bool,

    /// Time budget for the email domain normalization stage in milliseconds (default: 200)
    pub email_domain_timeout_ms: u64,

    /// Time budget for the email shape check stage in milliseconds (default: 250)
    pub email_pattern_timeout_ms: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `CONTACTS_DATA_FILE`: JSON snapshot path (default: none, memory only)
    /// - `SEED_SAMPLE_CONTACTS`: `true`/`false` (default: true)
    /// - `EMAIL_DOMAIN_TIMEOUT_MS`: domain normalization budget (default: 200)
    /// - `EMAIL_PATTERN_TIMEOUT_MS`: shape check budget (default: 250)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() doesn't print to stdout
        let _ = dotenvy::dotenv();

        let data_file = match env::var("CONTACTS_DATA_FILE") {
            Ok(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "CONTACTS_DATA_FILE".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => None,
        };

        let seed_sample_contacts = Self::parse_env_bool("SEED_SAMPLE_CONTACTS", true)?;
        let email_domain_timeout_ms = Self::parse_env_u64("EMAIL_DOMAIN_TIMEOUT_MS", 200)?;
        let email_pattern_timeout_ms = Self::parse_env_u64("EMAIL_PATTERN_TIMEOUT_MS", 250)?;

        for (var, value) in [
            ("EMAIL_DOMAIN_TIMEOUT_MS", email_domain_timeout_ms),
            ("EMAIL_PATTERN_TIMEOUT_MS", email_pattern_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    var: var.to_string(),
                    reason: "Must be greater than zero".to_string(),
                });
            }
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            data_file,
            seed_sample_contacts,
            email_domain_timeout_ms,
            email_pattern_timeout_ms,
            log_level,
        })
    }

    /// Budget for the domain normalization stage.
    pub fn email_domain_timeout(&self) -> Duration {
        Duration::from_millis(self.email_domain_timeout_ms)
    }

    /// Budget for the shape check stage.
    pub fn email_pattern_timeout(&self) -> Duration {
        Duration::from_millis(self.email_pattern_timeout_ms)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as bool with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: None,
            seed_sample_contacts: true,
            email_domain_timeout_ms: 200,
            email_pattern_timeout_ms: 250,
            log_level: "error".to_string(),
        }
    }
}
