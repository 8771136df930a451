//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges within a
//! conversation. Assistant messages carry the category of the desk that
//! produced them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Category;

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Visitor input.
    User,
    /// Support desk reply.
    Assistant,
}

/// An immutable message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
    category: Option<Category>,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message.
    pub fn new(role: Role, content: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            role,
            content: content.into(),
            category,
            created_at: Utc::now(),
        }
    }

    /// Creates a user message. User messages are not categorised.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, None)
    }

    /// Creates an assistant message tagged with the desk that answered.
    pub fn assistant(content: impl Into<String>, category: Category) -> Self {
        Self::new(Role::Assistant, content, Some(category))
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
