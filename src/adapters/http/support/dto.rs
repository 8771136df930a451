//! HTTP DTOs for the status endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Category;

/// Response body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatusResponse {
    pub service: String,
    pub status: String,
    /// `"set"` when a generative provider is configured, `"missing"` otherwise.
    pub generative: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub categories: Vec<Category>,
    pub conversations: usize,
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub generative: bool,
}
