//! Request logging utilities for the relay
//!
//! Provides structured logging with correlation IDs for tracing a request
//! from intake through the outbound backend call. Prompt content and the
//! backend credential are never logged; only the prompt length is recorded.

use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Context for tracking a request through the relay
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log request intake after validation
    pub fn log_request_accepted(&self, prompt_chars: usize) {
        info!(
            trace_id = %self.trace_id,
            prompt_chars = %prompt_chars,
            "Generation request accepted"
        );
    }

    /// Log a retry attempt
    pub fn log_retry(&self, attempt: u32, reason: &str) {
        warn!(
            trace_id = %self.trace_id,
            attempt = %attempt,
            reason = %reason,
            elapsed_ms = %self.elapsed_ms(),
            "Retrying backend request"
        );
    }

    /// Log response received from the backend
    pub fn log_backend_response(&self, status: u16) {
        info!(
            trace_id = %self.trace_id,
            status = %status,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from backend"
        );
    }

    /// Log successful request completion
    pub fn log_request_complete(&self) {
        info!(
            trace_id = %self.trace_id,
            elapsed_ms = %self.elapsed_ms(),
            outcome = "success",
            "Generation request completed"
        );
    }

    /// Log request failure with its outcome class
    pub fn log_request_failed(&self, kind: &str, detail: &str) {
        error!(
            trace_id = %self.trace_id,
            elapsed_ms = %self.elapsed_ms(),
            outcome = %kind,
            detail = %detail,
            "Generation request failed"
        );
    }

    /// Log a timed-out outbound attempt
    pub fn log_timeout(&self, timeout_ms: u64) {
        error!(
            trace_id = %self.trace_id,
            timeout_ms = %timeout_ms,
            elapsed_ms = %self.elapsed_ms(),
            "Backend request timed out"
        );
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
