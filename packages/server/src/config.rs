use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use completion_client::{MISTRAL_BASE_URL, MISTRAL_SMALL};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub mistral_api_key: String,
    pub completion_base_url: String,
    pub completion_model: String,
    /// Postgres connection string. Unset means the in-memory store.
    pub database_url: Option<String>,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub fetch_timeout: Duration,
    pub generation_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or = |key: &str, default: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            mistral_api_key: var("MISTRAL_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context("MISTRAL_API_KEY must be set")?,
            completion_base_url: or("COMPLETION_BASE_URL", MISTRAL_BASE_URL),
            completion_model: or("COMPLETION_MODEL", MISTRAL_SMALL),
            database_url: var("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            port: or("PORT", "8000")
                .parse()
                .context("PORT must be a valid number")?,
            allowed_origins: parse_origins(&or("ALLOWED_ORIGINS", "http://localhost:3000")),
            fetch_timeout: Duration::from_secs(
                or("FETCH_TIMEOUT_SECS", "15")
                    .parse()
                    .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            generation_timeout: Duration::from_secs(
                or("GENERATION_TIMEOUT_SECS", "30")
                    .parse()
                    .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            max_upload_bytes: or("MAX_UPLOAD_BYTES", "16777216")
                .parse()
                .context("MAX_UPLOAD_BYTES must be a valid number")?,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
