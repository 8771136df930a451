//! Wire vocabulary of a support session.
//!
//! Inbound: one JSON object per query. Outbound: events tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Category, ConversationId};

/// One client query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InboundQuery {
    /// Query text. Missing and empty are treated alike: nothing happens.
    #[serde(default)]
    pub message: String,
    /// Conversation to continue. Unknown or malformed ids start a new one.
    #[serde(default)]
    pub conversation_id: Option<String>,
    /// Anonymous visitor tag, used for log correlation only.
    #[serde(default)]
    pub visitor_id: Option<String>,
    /// Signed-in user, forwarded to the Ticket and Account desks.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl InboundQuery {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn in_conversation(mut self, id: impl ToString) -> Self {
        self.conversation_id = Some(id.to_string());
        self
    }

    pub fn from_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Server to client events, in emission order per query:
/// one `Routing`, zero or more `Stream`, one `Complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SupportEvent {
    /// Desk chosen for the query, sent before any reply text.
    Routing {
        conversation_id: ConversationId,
        category: Category,
        category_description: String,
        note: String,
    },
    /// One fragment of the reply.
    Stream { content: String, category: Category },
    /// Reply finished and recorded.
    Complete {
        conversation_id: ConversationId,
        category: Category,
    },
}
