//! Support module - per-desk response data and the chunking policy.

pub mod catalog;
pub mod chunking;
mod profile;

pub use chunking::{chunk_text, ChunkWidth, TextChunks};
pub use profile::DomainProfile;
