//! Storage Adapters
//!
//! Implementations of the ConversationStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryConversationStore** - Process-local map, lost on restart

mod in_memory_conversation_store;

pub use in_memory_conversation_store::InMemoryConversationStore;
