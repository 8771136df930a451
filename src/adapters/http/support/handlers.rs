//! HTTP handlers for the status endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;

use crate::application::SessionOrchestrator;
use crate::domain::foundation::Category;

use super::dto::{HealthResponse, ServiceStatusResponse};

pub const SERVICE_NAME: &str = "Customer Support Swarm";

/// Shared state for the support routes.
#[derive(Clone)]
pub struct SupportAppState {
    pub orchestrator: Arc<SessionOrchestrator>,
}

impl SupportAppState {
    pub fn new(orchestrator: Arc<SessionOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// `GET /` - service liveness and capability summary.
pub async fn service_status(
    State(state): State<SupportAppState>,
) -> Result<Json<ServiceStatusResponse>, StatusCode> {
    let orchestrator = &state.orchestrator;
    let conversations = orchestrator.store().len().await.map_err(|e| {
        tracing::error!(error = %e, "Conversation store unavailable");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    Ok(Json(ServiceStatusResponse {
        service: SERVICE_NAME.to_string(),
        status: "running".to_string(),
        generative: if orchestrator.generative_configured() {
            "set"
        } else {
            "missing"
        }
        .to_string(),
        model: orchestrator.provider_info().map(|info| info.model.clone()),
        categories: Category::all().to_vec(),
        conversations,
    }))
}

/// `GET /health`
pub async fn health(State(state): State<SupportAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        generative: state.orchestrator.generative_configured(),
    })
}
