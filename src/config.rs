use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive whole number of seconds, got {value:?}")]
    InvalidSeconds { name: &'static str, value: String },
}

/// Settings read from the environment (and `.env`) at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub api_token: Option<String>,
    pub language: String,
    pub image_base: String,
    pub cache_ttl: Duration,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let cache_ttl = read_seconds(read("CACHE_TTL_SECS"), "CACHE_TTL_SECS", 300)?;
        let http_timeout_secs = read_seconds(read("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", 30)?;

        Ok(Self {
            api_base: read("TMDB_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_token: read("TMDB_TOKEN"),
            language: read("TMDB_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            image_base: read("TMDB_IMAGE_BASE").unwrap_or_else(|| DEFAULT_IMAGE_BASE.to_string()),
            cache_ttl: Duration::from_secs(cache_ttl),
            http_timeout_secs,
        })
    }
}

fn read_seconds(value: Option<String>, name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidSeconds { name, value: raw }),
        },
    }
}
