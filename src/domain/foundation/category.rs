//! Category enum representing the four support specialists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The domain specialist a query is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ticket,
    Event,
    Account,
    Faq,
}

impl Category {
    /// Returns all categories in the order a generative reply is checked.
    pub fn all() -> &'static [Category] {
        &[
            Category::Ticket,
            Category::Event,
            Category::Account,
            Category::Faq,
        ]
    }

    /// Wire name, also the keyword looked for in a generative reply.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ticket => "ticket",
            Category::Event => "event",
            Category::Account => "account",
            Category::Faq => "faq",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Ticket => "Ticket Support",
            Category::Event => "Event Info",
            Category::Account => "Account Help",
            Category::Faq => "FAQ",
        }
    }

    /// Human-readable description sent with the routing event.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Ticket => "🎫 Ticket Support",
            Category::Event => "🎵 Event Info",
            Category::Account => "👤 Account Help",
            Category::Faq => "❓ FAQ",
        }
    }

    /// Finds the first category name occurring in free text, checked in
    /// [`Category::all`] order.
    pub fn find_in(text: &str) -> Option<Category> {
        let lowered = text.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| lowered.contains(c.as_str()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string names no category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}
