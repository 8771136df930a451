//! Per-desk configuration consumed by the generic response pipeline.

use once_cell::sync::Lazy;

use super::catalog;
use super::chunking::{chunk_text, ChunkWidth, TextChunks};
use crate::domain::foundation::Category;
use crate::domain::routing::{CachedResponse, KeywordTable};

/// Everything that differs between the four support desks.
#[derive(Debug, Clone)]
pub struct DomainProfile {
    /// Desk this profile answers for.
    pub category: Category,
    /// Ordered cached replies, first match wins.
    pub cache: KeywordTable<&'static str>,
    /// Reply used when nothing else produced one.
    pub default_text: &'static str,
    /// System framing sent with generative requests.
    pub system_prompt: &'static str,
    /// Slice width for cached and default replies.
    pub chunk_width: ChunkWidth,
}

static TICKET: Lazy<DomainProfile> = Lazy::new(catalog::ticket::profile);
static EVENT: Lazy<DomainProfile> = Lazy::new(catalog::event::profile);
static ACCOUNT: Lazy<DomainProfile> = Lazy::new(catalog::account::profile);
static FAQ: Lazy<DomainProfile> = Lazy::new(catalog::faq::profile);

impl DomainProfile {
    /// Built-in profile for a category.
    pub fn builtin(category: Category) -> &'static DomainProfile {
        match category {
            Category::Ticket => &TICKET,
            Category::Event => &EVENT,
            Category::Account => &ACCOUNT,
            Category::Faq => &FAQ,
        }
    }

    /// First cached rule matching the query.
    pub fn cached(&self, query: &str) -> Option<&CachedResponse> {
        self.cache.first_match(query)
    }

    /// Slices `text` with this desk's width.
    pub fn chunks<'a>(&self, text: &'a str) -> TextChunks<'a> {
        chunk_text(text, self.chunk_width)
    }
}
