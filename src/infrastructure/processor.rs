//! Prompt processing service.
//!
//! [`PromptProcessor`] is the seam between the HTTP layer and the work done
//! for a prompt. [`SimulatedProcessor`] is the production implementation: it
//! waits for a configurable delay to stand in for downstream latency, then
//! echoes the prompt behind [`RESULT_PREFIX`].

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use super::cancellation::CancellationSignal;
use crate::domain::{ProcessingRequest, ProcessingResponse, RESULT_PREFIX};

/// Default simulated latency.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(100);

// =============================================================================
// Processing Error
// =============================================================================

/// Errors produced by a [`PromptProcessor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    /// The request object itself was absent.
    #[error("Request must not be null")]
    MissingRequest,

    /// The request was present but unusable.
    #[error("{0}")]
    InvalidArgument(String),

    /// The caller withdrew interest before processing completed.
    #[error("Processing was cancelled")]
    Cancelled,

    /// Anything else. The message is for logs only.
    #[error("Processing failed: {0}")]
    Internal(String),
}

impl ProcessingError {
    /// Returns true for failures caused by the caller's input.
    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(self, Self::MissingRequest | Self::InvalidArgument(_))
    }
}

// =============================================================================
// Prompt Processor Trait
// =============================================================================

/// Turns a processing request into a processing response.
///
/// Implementations hold no per-request state and are shared across all
/// concurrent requests behind an `Arc`.
pub trait PromptProcessor: Send + Sync + 'static {
    /// Processes a request.
    ///
    /// `request` is `None` when the caller supplied no request object at all.
    /// Suspension points must complete early with
    /// [`ProcessingError::Cancelled`] once `signal` fires.
    fn process(
        &self,
        request: Option<ProcessingRequest>,
        signal: CancellationSignal,
    ) -> impl Future<Output = Result<ProcessingResponse, ProcessingError>> + Send;
}

// =============================================================================
// Simulated Processor
// =============================================================================

/// Processor that simulates downstream latency and echoes the prompt.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    /// Creates a processor with the given simulated latency.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the simulated latency.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

impl PromptProcessor for SimulatedProcessor {
    async fn process(
        &self,
        request: Option<ProcessingRequest>,
        signal: CancellationSignal,
    ) -> Result<ProcessingResponse, ProcessingError> {
        let request = request.ok_or(ProcessingError::MissingRequest)?;
        let prompt = request.prompt.ok_or_else(|| {
            ProcessingError::InvalidArgument("Prompt must be provided".to_string())
        })?;

        tracing::info!(prompt = %prompt, "Received prompt for processing");

        tokio::select! {
            () = tokio::time::sleep(self.delay) => {}
            () = signal.cancelled() => {
                tracing::debug!("Prompt processing cancelled before completion");
                return Err(ProcessingError::Cancelled);
            }
        }

        let response = ProcessingResponse::completed(format!("{RESULT_PREFIX}{prompt}"));

        tracing::info!(result = %response.result, "Prompt processed successfully");

        Ok(response)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cancellation::CancellationSource;
    use rstest::rstest;

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn test_process_prefixes_prompt() {
        let processor = SimulatedProcessor::default();

        let response = processor
            .process(
                Some(ProcessingRequest::new("Write a poem about the sea.")),
                CancellationSignal::never(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.result,
            "Processed Correctly: Write a poem about the sea."
        );
        assert!(response.success);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn test_process_waits_for_delay() {
        let processor = SimulatedProcessor::new(Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        processor
            .process(Some(ProcessingRequest::new("x")), CancellationSignal::never())
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[rstest]
    #[tokio::test]
    async fn test_process_missing_request() {
        let processor = SimulatedProcessor::new(Duration::ZERO);

        let result = processor.process(None, CancellationSignal::never()).await;

        assert_eq!(result, Err(ProcessingError::MissingRequest));
    }

    #[rstest]
    #[tokio::test]
    async fn test_process_missing_prompt_is_argument_error() {
        let processor = SimulatedProcessor::new(Duration::ZERO);

        let error = processor
            .process(
                Some(ProcessingRequest::without_prompt()),
                CancellationSignal::never(),
            )
            .await
            .unwrap_err();

        assert!(error.is_argument_error());
        assert_eq!(error.to_string(), "Prompt must be provided");
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn test_process_cancelled_during_delay() {
        let processor = SimulatedProcessor::new(Duration::from_secs(10));
        let source = CancellationSource::new();
        let signal = source.signal();

        let handle = tokio::spawn(async move {
            processor
                .process(Some(ProcessingRequest::new("x")), signal)
                .await
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        source.cancel();

        let result = handle.await.unwrap();
        assert_eq!(result, Err(ProcessingError::Cancelled));
    }

    #[rstest]
    #[tokio::test]
    async fn test_process_already_cancelled() {
        let processor = SimulatedProcessor::new(Duration::from_secs(10));
        let source = CancellationSource::new();
        source.cancel();

        let result = processor
            .process(Some(ProcessingRequest::new("x")), source.signal())
            .await;

        assert_eq!(result, Err(ProcessingError::Cancelled));
    }

    #[rstest]
    #[case(ProcessingError::MissingRequest, true)]
    #[case(ProcessingError::InvalidArgument("bad".to_string()), true)]
    #[case(ProcessingError::Cancelled, false)]
    #[case(ProcessingError::Internal("boom".to_string()), false)]
    fn test_is_argument_error(#[case] error: ProcessingError, #[case] expected: bool) {
        assert_eq!(error.is_argument_error(), expected);
    }
}
