use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{LlmConfig, DEFAULT_API_URL, DEFAULT_MODEL};
use crate::session::DEFAULT_SESSION_TTL;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Sessions untouched for longer than this are dropped.
    pub session_ttl: Duration,
    /// `None` when `SUMMARY_API_KEY` is unset; summaries then always use the fallback.
    pub summary: Option<LlmConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let summary = match optional_env("SUMMARY_API_KEY") {
            Some(api_key) => Some(LlmConfig {
                api_key,
                model: optional_env("SUMMARY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: optional_env("SUMMARY_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                timeout: optional_env("SUMMARY_TIMEOUT_SECS")
                    .map(|secs| {
                        secs.parse::<u64>()
                            .context("SUMMARY_TIMEOUT_SECS must be a whole number of seconds")
                    })
                    .transpose()?
                    .map(Duration::from_secs),
            }),
            None => None,
        };

        let session_ttl = optional_env("SESSION_TTL_SECS")
            .map(|secs| {
                secs.parse::<u64>()
                    .context("SESSION_TTL_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map_or(DEFAULT_SESSION_TTL, Duration::from_secs);

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_ttl,
            summary,
        })
    }
}

/// Reads `key`, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
