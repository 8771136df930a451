//! Conversation record: an append-only message log.

use super::message::Message;
use crate::domain::foundation::ConversationId;

/// Ordered log of messages on one chat thread.
///
/// # Invariants
///
/// - Messages are only ever appended, never edited or removed.
/// - Order reflects arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    id: ConversationId,
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new(id: ConversationId) -> Self {
        Self {
            id,
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    /// Appends a message at the tail.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Messages in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Role;
    use crate::domain::foundation::Category;

    #[test]
    fn new_conversation_is_empty() {
        let id = ConversationId::new();
        let conversation = Conversation::new(id);
        assert_eq!(conversation.id(), id);
        assert!(conversation.is_empty());
    }

    #[test]
    fn append_preserves_order() {
        let mut conversation = Conversation::new(ConversationId::new());
        conversation.append(Message::user("first"));
        conversation.append(Message::assistant("second", Category::Event));

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.messages()[0].role(), Role::User);
        assert_eq!(conversation.messages()[1].content(), "second");
    }
}
