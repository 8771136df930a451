//! In-Memory Conversation Store Adapter
//!
//! Keeps every conversation in a process-local map. Nothing is evicted;
//! the map lives until the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, StoreError};

/// In-memory storage for conversation logs
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.conversations.write().await.clear();
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn resolve_or_create(
        &self,
        id: Option<ConversationId>,
    ) -> Result<ConversationId, StoreError> {
        if let Some(id) = id {
            if self.conversations.read().await.contains_key(&id) {
                return Ok(id);
            }
        }

        let id = ConversationId::new();
        self.conversations
            .write()
            .await
            .insert(id, Conversation::new(id));
        tracing::debug!(conversation_id = %id, "Created conversation");
        Ok(id)
    }

    async fn append(&self, id: ConversationId, message: Message) -> Result<(), StoreError> {
        let mut conversations = self.conversations.write().await;
        conversations
            .entry(id)
            .or_insert_with(|| {
                tracing::debug!(conversation_id = %id, "Append to unknown conversation, creating it");
                Conversation::new(id)
            })
            .append(message);
        Ok(())
    }

    async fn history(&self, id: ConversationId) -> Result<Vec<Message>, StoreError> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .get(&id)
            .map(|c| c.messages().to_vec())
            .unwrap_or_default())
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.conversations.read().await.len())
    }
}
