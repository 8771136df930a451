//! Conversation domain module.
//!
//! Per-conversation message logs kept for the lifetime of the process.

#[allow(clippy::module_inception)]
mod conversation;
mod message;

pub use conversation::Conversation;
pub use message::{Message, Role};
