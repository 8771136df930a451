//! Routing module - keyword tables used for instant classification and
//! cached responses.

mod keyword_table;
mod rules;

pub use keyword_table::{CachedResponse, CategoryRule, KeywordRule, KeywordTable};
pub use rules::routing_table;
