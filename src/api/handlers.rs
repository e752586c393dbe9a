//! HTTP handlers for the prompt processing API.
//!
//! `process_prompt` validates the request, runs the processor on its own task
//! and maps the outcome to a status code. The processor task is tied to the
//! request through a cancellation guard: if the server drops the handler
//! (client disconnect), the guard fires and the processor stops at its next
//! suspension point.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use super::dto::{HealthResponse, ROOT_STATUS_MESSAGE};
use super::error::ApiErrorResponse;
use crate::domain::{ProcessingRequest, ProcessingResponse, PromptPolicy, validate_prompt};
use crate::infrastructure::{CancellationSource, ProcessingError, PromptProcessor};

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// The processor is constructed once at startup and shared by every request.
pub struct AppState<Processor> {
    /// Prompt processor.
    pub processor: Arc<Processor>,
    /// Prompt validation policy.
    pub prompt_policy: PromptPolicy,
}

impl<Processor> AppState<Processor> {
    /// Creates a new `AppState` with no prompt length limit.
    #[must_use]
    pub fn new(processor: Processor) -> Self {
        Self::with_policy(processor, PromptPolicy::unbounded())
    }

    /// Creates a new `AppState` with the given prompt policy.
    #[must_use]
    pub fn with_policy(processor: Processor, prompt_policy: PromptPolicy) -> Self {
        Self {
            processor: Arc::new(processor),
            prompt_policy,
        }
    }
}

// Manual impl: `Processor` itself need not be `Clone`.
impl<Processor> Clone for AppState<Processor> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
            prompt_policy: self.prompt_policy,
        }
    }
}

// =============================================================================
// POST /api/ai/process Handler
// =============================================================================

/// Processes a prompt.
///
/// # Request Body
///
/// ```json
/// { "prompt": "Write a poem about the sea." }
/// ```
///
/// # Response
///
/// - **200 OK**: `{ "result", "processedAt", "success" }`
/// - **400 Bad Request**: missing, blank or too long prompt; malformed body;
///   argument failure from the processor
/// - **500 Internal Server Error**: any other failure, with a generic detail
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] carrying a problem body for every non-200
/// outcome.
pub async fn process_prompt<Processor: PromptProcessor>(
    State(state): State<AppState<Processor>>,
    payload: Result<Json<Option<ProcessingRequest>>, JsonRejection>,
) -> Result<Json<ProcessingResponse>, ApiErrorResponse> {
    let Json(request) = payload.inspect_err(|rejection| {
        tracing::debug!(%rejection, "Rejected malformed request body");
    })?;

    // A `null` body is forwarded so the processor reports the missing request.
    if let Some(request) = &request {
        validate_prompt(request, &state.prompt_policy).inspect_err(|violation| {
            tracing::debug!(%violation, "Rejected prompt");
        })?;
    }

    let guard = CancellationSource::new().cancel_on_drop();
    let signal = guard.signal();
    let processor = Arc::clone(&state.processor);

    let outcome = tokio::spawn(async move { processor.process(request, signal).await }).await;
    drop(guard);

    match outcome {
        Ok(Ok(response)) => Ok(Json(response)),
        Ok(Err(error)) => Err(map_processing_error(error)),
        Err(join_error) => {
            tracing::error!(error = %join_error, "Prompt processing task failed");
            Err(ApiErrorResponse::internal_error())
        }
    }
}

/// Logs a processing failure at the level its kind warrants and converts it.
fn map_processing_error(error: ProcessingError) -> ApiErrorResponse {
    match &error {
        ProcessingError::MissingRequest | ProcessingError::InvalidArgument(_) => {
            tracing::warn!(%error, "Invalid argument while processing prompt");
        }
        ProcessingError::Cancelled => {
            tracing::debug!("Prompt processing was cancelled");
        }
        ProcessingError::Internal(_) => {
            tracing::error!(%error, "Error processing prompt");
        }
    }
    ApiErrorResponse::from(error)
}

// =============================================================================
// GET /api/ai/health Handler
// =============================================================================

/// Health check endpoint.
///
/// Always answers 200; there is no shared state that could make it fail.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// =============================================================================
// GET / Handler
// =============================================================================

/// Plain-text liveness message.
pub async fn root_status() -> &'static str {
    ROOT_STATUS_MESSAGE
}

// =============================================================================
// Tests
// =============================================================================
