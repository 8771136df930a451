//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and the outside world. Adapters implement them.
//!
//! - `AIProvider` - Generative model access (classification fallback, replies)
//! - `ConversationStore` - Per-conversation message logs

mod ai_provider;
mod conversation_store;

pub use ai_provider::{
    AIError, AIProvider, ChunkStream, CompletionRequest, CompletionResponse, FinishReason,
    Message, MessageRole, ProviderInfo, RequestMetadata, StreamChunk, TokenUsage,
};
pub use conversation_store::{ConversationStore, StoreError};
