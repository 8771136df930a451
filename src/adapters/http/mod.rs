//! HTTP adapters - REST and WebSocket endpoints.

pub mod support;

pub use support::{support_router, SupportAppState};
