//! Support Swarm - multi-desk customer support over WebSocket.
//!
//! Queries are routed to a Ticket, Event, Account or FAQ desk by an ordered
//! keyword table with a generative fallback, answered from cached replies,
//! a generative model or a default text, and streamed back in fragments.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
