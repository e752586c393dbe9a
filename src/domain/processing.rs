//! Processing request/response records and prompt validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix prepended to every prompt by the processor.
pub const RESULT_PREFIX: &str = "Processed Correctly: ";

// =============================================================================
// Request / Response
// =============================================================================

/// Incoming prompt to be processed.
///
/// `prompt` is optional on the wire so that an absent or `null` prompt reaches
/// validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRequest {
    /// Free-text prompt.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl ProcessingRequest {
    /// Creates a request carrying the given prompt.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }

    /// Creates a request without a prompt.
    #[must_use]
    pub const fn without_prompt() -> Self {
        Self { prompt: None }
    }
}

/// Outcome of a successful processing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResponse {
    /// Processed text.
    pub result: String,
    /// UTC time at which the response was produced.
    pub processed_at: DateTime<Utc>,
    /// Always `true` for responses built by a processor.
    pub success: bool,
}

impl ProcessingResponse {
    /// Creates a successful response stamped with the current UTC time.
    #[must_use]
    pub fn completed(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            processed_at: Utc::now(),
            success: true,
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Prompt length policy.
///
/// No limit is enforced unless `max_length` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptPolicy {
    /// Maximum prompt length in characters.
    pub max_length: Option<usize>,
}

impl PromptPolicy {
    /// A policy without a length limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_length: None }
    }

    /// A policy rejecting prompts longer than `max_length` characters.
    #[must_use]
    pub const fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
        }
    }
}

/// Reasons a prompt is rejected before processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptViolation {
    /// Prompt is missing, empty, or whitespace only.
    #[error("Prompt cant be empty")]
    Blank,

    /// Prompt is longer than the configured maximum.
    #[error("Prompt exceeds the maximum length of {max} characters")]
    TooLong {
        /// Configured maximum.
        max: usize,
        /// Actual length of the prompt.
        actual: usize,
    },
}

/// Validates a request against the prompt policy.
///
/// Length is counted in Unicode scalar values, not bytes.
///
/// # Errors
///
/// Returns [`PromptViolation::Blank`] for a missing or blank prompt and
/// [`PromptViolation::TooLong`] when the policy limit is exceeded.
pub fn validate_prompt(
    request: &ProcessingRequest,
    policy: &PromptPolicy,
) -> Result<(), PromptViolation> {
    let prompt = match request.prompt.as_deref() {
        Some(prompt) if !prompt.trim().is_empty() => prompt,
        _ => return Err(PromptViolation::Blank),
    };

    if let Some(max) = policy.max_length {
        let actual = prompt.chars().count();
        if actual > max {
            return Err(PromptViolation::TooLong { max, actual });
        }
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
