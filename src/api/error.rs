//! API error handling.
//!
//! Every non-2xx response produced by the application carries a
//! [`ProblemDetails`] body.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::PromptViolation;
use crate::infrastructure::ProcessingError;

/// Detail returned for every unexpected failure.
pub const INTERNAL_ERROR_DETAIL: &str = "An error occurred while processing your request";

/// Non-standard status used when the caller abandoned the request.
const CLIENT_CLOSED_REQUEST: u16 = 499;

// =============================================================================
// Problem Details
// =============================================================================

/// Structured error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Short, stable summary of the problem.
    pub title: String,
    /// Human-readable explanation specific to this occurrence.
    pub detail: String,
    /// HTTP status code.
    pub status: u16,
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and problem body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Problem body.
    pub problem: ProblemDetails,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            problem: ProblemDetails {
                title: title.into(),
                detail: detail.into(),
                status: status.as_u16(),
            },
        }
    }

    /// 400 for a missing or blank prompt.
    #[must_use]
    pub fn invalid_prompt(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid Prompt", detail)
    }

    /// 400 for a prompt over the configured length limit.
    #[must_use]
    pub fn prompt_too_long(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Prompt Too Long", detail)
    }

    /// 400 for an unusable request body or argument.
    #[must_use]
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid Request", detail)
    }

    /// 499 for a request abandoned by the caller.
    #[must_use]
    pub fn client_closed_request() -> Self {
        let status = StatusCode::from_u16(CLIENT_CLOSED_REQUEST).unwrap_or(StatusCode::BAD_REQUEST);
        Self::new(status, "Client Closed Request", "The request was cancelled")
    }

    /// 500 with a generic detail. Never carries internal error text.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            INTERNAL_ERROR_DETAIL,
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.problem)).into_response()
    }
}

impl From<PromptViolation> for ApiErrorResponse {
    fn from(violation: PromptViolation) -> Self {
        match violation {
            PromptViolation::Blank => Self::invalid_prompt(violation.to_string()),
            PromptViolation::TooLong { .. } => Self::prompt_too_long(violation.to_string()),
        }
    }
}

impl From<ProcessingError> for ApiErrorResponse {
    fn from(error: ProcessingError) -> Self {
        match error {
            ProcessingError::MissingRequest | ProcessingError::InvalidArgument(_) => {
                Self::invalid_request(error.to_string())
            }
            ProcessingError::Cancelled => Self::client_closed_request(),
            // Internal errors must not expose details to clients.
            ProcessingError::Internal(_) => Self::internal_error(),
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_request(rejection.body_text())
    }
}

// =============================================================================
// Tests
// =============================================================================
