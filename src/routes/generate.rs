//! Recipe generation endpoint
//!
//! Accepts a client prompt, validates it, and relays it to the generation
//! backend with the server-held credential attached. The backend payload is
//! returned to the client unchanged.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{
    error::RelayError,
    proxy::RequestContext,
    routes::metrics::record_request,
    AppState,
};

/// Inbound generation request
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
}

/// Validate and normalize the prompt.
///
/// Returns the trimmed prompt that will be forwarded. Rejections happen
/// before any outbound call; an over-length prompt is refused outright
/// rather than truncated, so the backend never sees a silently altered
/// prompt.
fn validate_prompt(request: &GenerateRequest, max_chars: usize) -> Result<&str, RelayError> {
    let prompt = request
        .prompt
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if prompt.is_empty() {
        return Err(RelayError::InvalidPrompt(
            "prompt must be a non-empty string".to_string(),
        ));
    }

    let chars = prompt.chars().count();
    if chars > max_chars {
        return Err(RelayError::InvalidPrompt(format!(
            "prompt exceeds the maximum length of {} characters",
            max_chars
        )));
    }

    Ok(prompt)
}

/// Handle generation requests
///
/// Per request: Received -> Validated -> Forwarding (bounded retry) ->
/// Succeeded | Failed. Validation failures are terminal and make zero
/// outbound calls.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, RelayError> {
    let start_time = Instant::now();
    let ctx = RequestContext::new();

    let request: GenerateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => {
            ctx.log_request_failed("MalformedRequest", "body is not valid JSON");
            record_request("MalformedRequest", start_time.elapsed().as_secs_f64());
            return Err(RelayError::MalformedRequest);
        }
    };

    let prompt = match validate_prompt(&request, state.config.max_prompt_chars) {
        Ok(prompt) => prompt,
        Err(e) => {
            ctx.log_request_failed("InvalidPrompt", &e.to_string());
            record_request("InvalidPrompt", start_time.elapsed().as_secs_f64());
            return Err(e);
        }
    };

    ctx.log_request_accepted(prompt.chars().count());

    // The only suspension point: one logical outbound call to the backend
    match state.generator.generate(prompt, &ctx).await {
        Ok(payload) => {
            ctx.log_request_complete();
            record_request("success", start_time.elapsed().as_secs_f64());
            Ok((StatusCode::OK, Json(payload)).into_response())
        }
        Err(e) => {
            // GeneratorClient::generate already logged the failure
            let kind = match &e {
                RelayError::BackendUnavailable => "BackendUnavailable",
                RelayError::BackendError => "BackendError",
                _ => "InternalError",
            };
            record_request(kind, start_time.elapsed().as_secs_f64());
            Err(e)
        }
    }
}
