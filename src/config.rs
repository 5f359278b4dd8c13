use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://v2.api.noroff.dev";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Missing required setting: {0}")]
    Missing(String),
}

// Client configuration for the booking API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub page_limit: u32,
    pub cache_ttl_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_ms: 10_000,
            page_limit: 10,
            cache_ttl_seconds: 300,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Builds a config from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            base_url: lookup("HOLIDAZE_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            api_key: lookup("HOLIDAZE_API_KEY").unwrap_or_else(|| {
                warn!("HOLIDAZE_API_KEY not set, authenticated calls will be rejected");
                defaults.api_key
            }),
            timeout_ms: parse_or(&lookup, "HOLIDAZE_TIMEOUT_MS", defaults.timeout_ms)?,
            page_limit: parse_or(&lookup, "HOLIDAZE_PAGE_LIMIT", defaults.page_limit)?,
            cache_ttl_seconds: parse_or(
                &lookup,
                "HOLIDAZE_CACHE_TTL_SECONDS",
                defaults.cache_ttl_seconds,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Missing("HOLIDAZE_API_BASE_URL".to_string()));
        }
        if self.page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HOLIDAZE_PAGE_LIMIT".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
