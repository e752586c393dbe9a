//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use dto::{HealthResponse, ROOT_STATUS_MESSAGE, SERVICE_NAME, SERVICE_VERSION};
pub use error::{ApiErrorResponse, INTERNAL_ERROR_DETAIL, ProblemDetails};
pub use handlers::{AppState, health_check, process_prompt, root_status};
pub use routes::create_router;
