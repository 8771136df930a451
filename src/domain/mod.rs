//! Domain layer containing routing and support logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, categories)
//! - `routing` - Ordered keyword tables and the built-in routing rules
//! - `support` - Per-desk reply catalog, profiles and chunking
//! - `conversation` - Message log records

pub mod conversation;
pub mod foundation;
pub mod routing;
pub mod support;
