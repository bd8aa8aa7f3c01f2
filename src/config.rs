//! Configuration management for the relay
//!
//! Configuration is loaded from environment variables once at startup and
//! never mutated afterwards. Handlers receive it through `AppState`.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Generation backend base URL
    pub generator_api_url: String,
    /// Credential for the generation backend (required; the relay refuses
    /// to start without it rather than send unauthenticated calls)
    pub generator_api_key: String,

    /// Timeout for a single outbound attempt (in seconds)
    pub request_timeout_secs: u64,
    /// Additional attempts after a transport-level failure
    pub max_retries: u32,
    /// Upper bound on prompt length (in characters, after trimming)
    pub max_prompt_chars: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("RELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("RELAY_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid RELAY_PORT")?,

            generator_api_url: env::var("GENERATOR_API_URL")
                .context("GENERATOR_API_URL must be set")?,
            generator_api_key: env::var("GENERATOR_API_KEY")
                .context("GENERATOR_API_KEY must be set")?,

            request_timeout_secs: env::var("GENERATOR_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid GENERATOR_TIMEOUT_SECS")?,
            max_retries: env::var("GENERATOR_MAX_RETRIES")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .context("Invalid GENERATOR_MAX_RETRIES")?,
            max_prompt_chars: env::var("MAX_PROMPT_CHARS")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("Invalid MAX_PROMPT_CHARS")?,
        })
    }

    /// Timeout for a single outbound attempt
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
