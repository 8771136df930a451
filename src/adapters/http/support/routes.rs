//! Axum routes for the support service.

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health, service_status, SupportAppState};
use super::ws_handler::support_ws_handler;

/// Creates routes for the support endpoints.
///
/// - GET / - Service status
/// - GET /health - Liveness probe
/// - WS /ws/chat - Support chat
pub fn support_routes() -> Router<SupportAppState> {
    Router::new()
        .route("/", get(service_status))
        .route("/health", get(health))
        .route("/ws/chat", get(support_ws_handler))
}

/// Full application router with state, request tracing and CORS applied.
pub fn support_router(state: SupportAppState, cors_origins: &[String]) -> Router {
    support_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

/// CORS for the configured origins, with credentials allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
