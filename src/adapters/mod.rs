//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Generative model providers (Gemini, mock)
//! - `storage` - Conversation store implementations
//! - `http` - Axum routes and the WebSocket chat endpoint

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider};
pub use storage::InMemoryConversationStore;
