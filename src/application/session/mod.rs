//! Support sessions: one per connection, sharing an orchestrator.

mod events;
mod orchestrator;
mod support_session;

pub use events::{InboundQuery, SupportEvent};
pub use orchestrator::{OrchestratorConfig, SessionOrchestrator};
pub use support_session::{SessionError, SessionState, SupportSession, APOLOGY};
