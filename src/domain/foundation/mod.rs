//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers and the closed category set that form the
//! vocabulary of the support domain.

mod category;
mod ids;

pub use category::{Category, UnknownCategory};
pub use ids::{anonymous_visitor_tag, ConnectionId, ConversationId};
