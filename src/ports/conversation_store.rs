//! Conversation store port.
//!
//! Keeps the message log of every conversation the process has seen. The
//! orchestrator only talks to this trait, so a persistent backend can be
//! swapped in without touching session code.
//!
//! # Leniency
//!
//! `append` on an unknown id creates the conversation instead of failing.
//! This is intentional: a client that lost the server's state keeps
//! chatting into a fresh log rather than seeing an error.

use async_trait::async_trait;

use crate::domain::conversation::Message;
use crate::domain::foundation::ConversationId;

/// Errors a store backend may report.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Port for conversation persistence.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns `id` if it already names a conversation, otherwise creates an
    /// empty conversation under a fresh id and returns that.
    async fn resolve_or_create(
        &self,
        id: Option<ConversationId>,
    ) -> Result<ConversationId, StoreError>;

    /// Appends a message, creating the conversation if the id is unknown.
    async fn append(&self, id: ConversationId, message: Message) -> Result<(), StoreError>;

    /// Snapshot of the messages in arrival order. Empty for unknown ids.
    async fn history(&self, id: ConversationId) -> Result<Vec<Message>, StoreError>;

    /// Number of conversations held.
    async fn len(&self) -> Result<usize, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_error_carries_backend_reason() {
        let err = StoreError::Unavailable("replica down".into());
        assert_eq!(err.to_string(), "Storage backend unavailable: replica down");
    }
}
