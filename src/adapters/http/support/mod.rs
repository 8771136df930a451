//! HTTP adapter for the support service.
//!
//! - `GET /` - Service status
//! - `GET /health` - Liveness probe
//! - `GET /ws/chat` - WebSocket support chat

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod ws_handler;

pub use dto::{HealthResponse, ServiceStatusResponse};
pub use handlers::{SupportAppState, SERVICE_NAME};
pub use routes::{support_router, support_routes};
