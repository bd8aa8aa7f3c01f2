//! Cuizine Relay - generation-request proxy
//!
//! This library provides the core functionality for the Cuizine relay
//! server. It mediates between the untrusted frontend and the trusted
//! recipe generation backend: validating prompts, attaching the
//! server-held credential, and mapping backend failures into a stable
//! client-facing contract.

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::error::{RelayError, RelayResult};
pub use crate::proxy::GeneratorClient;

/// Application state shared across all request handlers
///
/// Everything here is read-only after startup; requests share no mutable
/// state with each other.
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub start_time: Instant,
    /// Client for forwarding prompts to the generation backend
    pub generator: Arc<GeneratorClient>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling; per-attempt
        // timeouts are applied by GeneratorClient from configuration
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .build()?;

        let generator = Arc::new(GeneratorClient::new(http_client.clone(), &config));

        Ok(Self {
            config,
            http_client,
            start_time: Instant::now(),
            generator,
        })
    }

    /// Create a new application state for testing with a mocked backend
    ///
    /// Identical to `new` but infallible and intended to be pointed at a
    /// wiremock server via `config.generator_api_url`.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_for_testing(config: Config) -> Self {
        let http_client = reqwest::Client::new();
        let generator = Arc::new(GeneratorClient::new(http_client.clone(), &config));

        Self {
            config,
            http_client,
            start_time: Instant::now(),
            generator,
        }
    }
}
