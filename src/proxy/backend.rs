//! Generation backend client
//!
//! Handles the single outbound call the relay makes: POST /generate on the
//! configured backend, authenticated with the server-held credential. The
//! success payload is opaque to the relay and passed through verbatim.

use serde::Serialize;
use tracing::debug;

use crate::{
    config::Config,
    error::{RelayError, RelayResult},
    proxy::logging::RequestContext,
};

/// Outbound request body sent to the backend
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

/// Client for the recipe generation backend
pub struct GeneratorClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: std::time::Duration,
    max_retries: u32,
}

impl GeneratorClient {
    /// Create a new generator client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.generator_api_url.clone(),
            api_key: config.generator_api_key.clone(),
            timeout: config.request_timeout(),
            max_retries: config.max_retries,
        }
    }

    /// Forward a validated prompt to the backend and return its payload.
    ///
    /// Transport-level failures (connect errors, timeouts) are retried up to
    /// `max_retries` times since no backend work has been observed. A backend
    /// response, even a failing one, is never retried: re-running a
    /// semantically failed generation would duplicate work on the backend.
    pub async fn generate(
        &self,
        prompt: &str,
        ctx: &RequestContext,
    ) -> RelayResult<serde_json::Value> {
        let url = format!("{}/generate", self.base_url);
        let body = GenerateRequest { prompt };

        let mut attempt = 0;
        let response = loop {
            let result = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .timeout(self.timeout)
                .json(&body)
                .send()
                .await;

            match result {
                Ok(response) => break response,
                Err(e) if Self::is_retryable(&e) && attempt < self.max_retries => {
                    attempt += 1;
                    let reason = if e.is_timeout() { "timeout" } else { "connect" };
                    ctx.log_retry(attempt, reason);
                }
                Err(e) if e.is_timeout() => {
                    ctx.log_timeout(self.timeout.as_millis() as u64);
                    return Err(RelayError::BackendUnavailable);
                }
                Err(e) => {
                    ctx.log_request_failed("BackendUnavailable", &e.to_string());
                    return Err(RelayError::BackendUnavailable);
                }
            }
        };

        let status = response.status();
        ctx.log_backend_response(status.as_u16());

        if !status.is_success() {
            // Keep the backend's error body server-side only
            let text = response.text().await.unwrap_or_default();
            debug!(
                trace_id = %ctx.trace_id,
                status = %status,
                body = %text,
                "Backend reported an error"
            );
            ctx.log_request_failed("BackendError", &format!("backend status {}", status));
            return Err(RelayError::BackendError);
        }

        // 2xx with a body the relay cannot parse is still a backend fault
        response.json::<serde_json::Value>().await.map_err(|e| {
            ctx.log_request_failed("BackendError", &format!("malformed success body: {}", e));
            RelayError::BackendError
        })
    }

    /// Only idempotent-safe transport failures are worth a second attempt
    fn is_retryable(error: &reqwest::Error) -> bool {
        error.is_timeout() || error.is_connect()
    }
}
