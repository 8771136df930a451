//! Per-connection session: drives one query at a time through the
//! orchestrator and emits events into a sink.

use futures::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;
use thiserror::Error;

use super::events::{InboundQuery, SupportEvent};
use super::orchestrator::SessionOrchestrator;
use crate::domain::conversation::Message;
use crate::domain::foundation::{anonymous_visitor_tag, Category, ConnectionId, ConversationId};
use crate::ports::{RequestMetadata, StoreError};

/// Sent as the whole reply when an exchange fails part-way.
pub const APOLOGY: &str = "Sorry, I encountered an issue. Please try rephrasing your question.";

/// Where the session is in handling the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingClassification,
    Streaming,
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// The client is gone. Ends the session.
    #[error("transport closed: {0}")]
    Transport(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One client connection.
pub struct SupportSession {
    orchestrator: Arc<SessionOrchestrator>,
    connection_id: ConnectionId,
    state: SessionState,
}

impl SupportSession {
    pub fn new(orchestrator: Arc<SessionOrchestrator>) -> Self {
        Self {
            orchestrator,
            connection_id: ConnectionId::new(),
            state: SessionState::Idle,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Serves queries until the inbound stream ends or the sink fails.
    ///
    /// Store failures end only the exchange they happen in.
    pub async fn run<I, S>(mut self, mut inbound: I, mut sink: S)
    where
        I: Stream<Item = InboundQuery> + Unpin,
        S: Sink<SupportEvent> + Unpin,
        S::Error: Display,
    {
        tracing::info!(connection_id = %self.connection_id, "Session started");

        while let Some(query) = inbound.next().await {
            match self.handle(query, &mut sink).await {
                Ok(_) => {}
                Err(SessionError::Transport(reason)) => {
                    tracing::debug!(connection_id = %self.connection_id, %reason, "Client gone");
                    break;
                }
                Err(err) => {
                    tracing::error!(connection_id = %self.connection_id, error = %err, "Exchange failed");
                }
            }
        }

        tracing::info!(connection_id = %self.connection_id, "Session ended");
    }

    /// Handles one query. Returns the conversation id, or `None` when the
    /// query was empty and ignored.
    pub async fn handle<S>(
        &mut self,
        query: InboundQuery,
        sink: &mut S,
    ) -> Result<Option<ConversationId>, SessionError>
    where
        S: Sink<SupportEvent> + Unpin,
        S::Error: Display,
    {
        if query.message.is_empty() {
            return Ok(None);
        }

        let result = self.exchange(query, sink).await;
        self.state = SessionState::Idle;
        result.map(Some)
    }

    async fn exchange<S>(
        &mut self,
        query: InboundQuery,
        sink: &mut S,
    ) -> Result<ConversationId, SessionError>
    where
        S: Sink<SupportEvent> + Unpin,
        S::Error: Display,
    {
        let orchestrator = Arc::clone(&self.orchestrator);
        let store = orchestrator.store();

        let visitor_id = query.visitor_id.clone().unwrap_or_else(anonymous_visitor_tag);
        let requested = query
            .conversation_id
            .as_deref()
            .and_then(|raw| raw.parse::<ConversationId>().ok());
        let conversation_id = store.resolve_or_create(requested).await?;

        let _exchange = orchestrator.lock_conversation(conversation_id).await;
        store
            .append(conversation_id, Message::user(query.message.as_str()))
            .await?;

        self.state = SessionState::AwaitingClassification;
        let classification = orchestrator.classifier().classify(&query.message).await;
        let category = classification.category;

        tracing::info!(
            connection_id = %self.connection_id,
            conversation_id = %conversation_id,
            visitor_id = %visitor_id,
            category = %category,
            "Routed query"
        );

        emit(
            sink,
            SupportEvent::Routing {
                conversation_id,
                category,
                category_description: category.description().to_string(),
                note: classification.note,
            },
        )
        .await?;

        self.state = SessionState::Streaming;
        let reply = match self
            .stream_reply(&query, conversation_id, category, sink)
            .await
        {
            Ok(reply) => reply,
            Err(SessionError::Transport(reason)) => return Err(SessionError::Transport(reason)),
            Err(err) => {
                tracing::error!(
                    conversation_id = %conversation_id,
                    error = %err,
                    "Reply failed, sending apology"
                );
                emit(
                    sink,
                    SupportEvent::Stream {
                        content: APOLOGY.to_string(),
                        category,
                    },
                )
                .await?;
                APOLOGY.to_string()
            }
        };

        if let Err(err) = store
            .append(conversation_id, Message::assistant(reply, category))
            .await
        {
            tracing::error!(conversation_id = %conversation_id, error = %err, "Failed to record reply");
        }

        emit(
            sink,
            SupportEvent::Complete {
                conversation_id,
                category,
            },
        )
        .await?;

        Ok(conversation_id)
    }

    /// Streams the desk's reply and returns it assembled.
    async fn stream_reply<S>(
        &self,
        query: &InboundQuery,
        conversation_id: ConversationId,
        category: Category,
        sink: &mut S,
    ) -> Result<String, SessionError>
    where
        S: Sink<SupportEvent> + Unpin,
        S::Error: Display,
    {
        let history = self.orchestrator.store().history(conversation_id).await?;
        let metadata = RequestMetadata::new(self.connection_id.to_string())
            .with_conversation(conversation_id)
            .with_user(query.user_id.clone());

        let mut fragments =
            self.orchestrator
                .pipeline(category)
                .resolve(&query.message, &history, metadata);

        let mut reply = String::new();
        while let Some(content) = fragments.next().await {
            reply.push_str(&content);
            emit(sink, SupportEvent::Stream { content, category }).await?;
        }

        Ok(reply)
    }
}

async fn emit<S>(sink: &mut S, event: SupportEvent) -> Result<(), SessionError>
where
    S: Sink<SupportEvent> + Unpin,
    S::Error: Display,
{
    sink.send(event)
        .await
        .map_err(|e| SessionError::Transport(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryConversationStore;

    fn session() -> SupportSession {
        SupportSession::new(Arc::new(SessionOrchestrator::new(
            None,
            Arc::new(InMemoryConversationStore::new()),
        )))
    }

    #[tokio::test]
    async fn empty_message_is_ignored() {
        let mut session = session();
        let mut events: Vec<SupportEvent> = Vec::new();

        let result = session.handle(InboundQuery::new(""), &mut events).await.unwrap();

        assert!(result.is_none());
        assert!(events.is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn exchange_emits_routing_stream_complete_and_returns_to_idle() {
        let mut session = session();
        let mut events: Vec<SupportEvent> = Vec::new();

        let id = session
            .handle(InboundQuery::new("connect my wallet"), &mut events)
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(
            events.first(),
            Some(SupportEvent::Routing { category: Category::Account, .. })
        ));
        assert_eq!(
            events.last(),
            Some(&SupportEvent::Complete {
                conversation_id: id,
                category: Category::Account
            })
        );
        assert!(events[1..events.len() - 1]
            .iter()
            .all(|e| matches!(e, SupportEvent::Stream { .. })));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn malformed_conversation_id_starts_fresh_conversation() {
        let mut session = session();
        let mut events: Vec<SupportEvent> = Vec::new();

        let id = session
            .handle(
                InboundQuery::new("help").in_conversation("not-a-uuid"),
                &mut events,
            )
            .await
            .unwrap()
            .unwrap();

        assert_ne!(id.to_string(), "not-a-uuid");
    }

    #[tokio::test]
    async fn closed_sink_is_a_transport_error() {
        let mut session = session();
        let (tx, rx) = futures::channel::mpsc::unbounded::<SupportEvent>();
        drop(rx);
        let mut sink = tx;

        let err = session
            .handle(InboundQuery::new("refund"), &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Transport(_)));
        assert_eq!(session.state(), SessionState::Idle);
    }
}
