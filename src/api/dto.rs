//! Data Transfer Objects for API responses that have no domain counterpart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "AI Processing";

/// API version reported by the health endpoint.
///
/// Part of the response contract; independent of the package version.
pub const SERVICE_VERSION: &str = "1.0.0";

/// Body of `GET /`.
pub const ROOT_STATUS_MESSAGE: &str = "AI Processing API is running";

/// Health check response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"Healthy"` while the process is serving requests.
    pub status: String,
    /// Service name.
    pub service: String,
    /// UTC time the check was answered.
    pub timestamp: DateTime<Utc>,
    /// Service version.
    pub version: String,
}

impl HealthResponse {
    /// Builds a healthy response stamped with the current time.
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "Healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now(),
            version: SERVICE_VERSION.to_string(),
        }
    }
}
