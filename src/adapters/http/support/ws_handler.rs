//! WebSocket handler for support chat.
//!
//! # Connection Flow
//! 1. Client upgrades on `GET /ws/chat`
//! 2. Each text frame is one JSON query; malformed frames are logged and skipped
//! 3. Events are written back as JSON text frames
//! 4. A close frame, a receive error or a failed send ends the session

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{future, SinkExt, StreamExt};

use crate::application::{InboundQuery, SessionOrchestrator, SupportEvent, SupportSession};
use crate::domain::foundation::ConnectionId;

use super::handlers::SupportAppState;

/// Handle WebSocket upgrade for support chat.
///
/// Route: `GET /ws/chat`
pub async fn support_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SupportAppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.orchestrator))
}

/// Runs one support session over an established socket.
async fn handle_socket(socket: WebSocket, orchestrator: Arc<SessionOrchestrator>) {
    let (sender, receiver) = socket.split();
    let session = SupportSession::new(orchestrator);
    let connection_id = session.connection_id();

    let inbound = receiver
        .take_while(|frame| future::ready(matches!(frame, Ok(m) if !matches!(m, Message::Close(_)))))
        .filter_map(move |frame| future::ready(frame.ok().and_then(|m| decode(connection_id, m))));

    let outbound = sender.with(|event: SupportEvent| future::ready(encode(&event)));

    session.run(inbound, outbound).await;
}

/// Parses a client frame into a query. Non-text and malformed frames yield `None`.
fn decode(connection_id: ConnectionId, message: Message) -> Option<InboundQuery> {
    match message {
        Message::Text(text) => match serde_json::from_str::<InboundQuery>(&text) {
            Ok(query) => Some(query),
            Err(e) => {
                tracing::warn!(connection_id = %connection_id, error = %e, "Malformed frame skipped");
                None
            }
        },
        Message::Binary(_) => {
            tracing::warn!(connection_id = %connection_id, "Received unsupported binary message");
            None
        }
        // Protocol ping/pong are answered by axum
        _ => None,
    }
}

fn encode(event: &SupportEvent) -> Result<Message, axum::Error> {
    serde_json::to_string(event)
        .map(Message::Text)
        .map_err(axum::Error::new)
}
