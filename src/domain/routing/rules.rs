//! Global keyword routing table.
//!
//! Consulted before any generative call. Entries are grouped by category
//! but the flat order is what counts: "refund" sits ahead of "how do", so a
//! refund question never reaches the FAQ desk, and "qr code" sits ahead of
//! "qr".

use once_cell::sync::Lazy;

use super::keyword_table::KeywordTable;
use crate::domain::foundation::Category;

const RULES: &[(&str, Category)] = &[
    // Ticket
    ("refund", Category::Ticket),
    ("ticket", Category::Ticket),
    ("purchase", Category::Ticket),
    ("bought", Category::Ticket),
    ("qr code", Category::Ticket),
    ("qr", Category::Ticket),
    ("transfer", Category::Ticket),
    ("resale", Category::Ticket),
    ("resell", Category::Ticket),
    ("cancel", Category::Ticket),
    ("order", Category::Ticket),
    // Event
    ("event", Category::Event),
    ("concert", Category::Event),
    ("show", Category::Event),
    ("when", Category::Event),
    ("date", Category::Event),
    ("venue", Category::Event),
    ("location", Category::Event),
    ("schedule", Category::Event),
    ("lakers", Category::Event),
    ("artist", Category::Event),
    ("perform", Category::Event),
    // Account
    ("wallet", Category::Account),
    ("connect", Category::Account),
    ("profile", Category::Account),
    ("account", Category::Account),
    ("fandom score", Category::Account),
    ("score", Category::Account),
    ("spotify", Category::Account),
    ("login", Category::Account),
    ("sign in", Category::Account),
    ("password", Category::Account),
    // FAQ
    ("what is", Category::Faq),
    ("how does", Category::Faq),
    ("how do", Category::Faq),
    ("explain", Category::Faq),
    ("help", Category::Faq),
    ("nft", Category::Faq),
    ("fanfirst", Category::Faq),
    ("policy", Category::Faq),
    ("about", Category::Faq),
];

static ROUTING_TABLE: Lazy<KeywordTable<Category>> =
    Lazy::new(|| KeywordTable::from_pairs(RULES.iter().copied()));

/// The process-wide routing table.
pub fn routing_table() -> &'static KeywordTable<Category> {
    &ROUTING_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_patterns_precede_broader_ones() {
        let table = routing_table();
        assert!(table.position("qr code") < table.position("qr"));
        assert!(table.position("fandom score") < table.position("score"));
        assert!(table.position("how does") < table.position("how do"));
        assert!(table.position("refund") < table.position("how do"));
    }

    #[test]
    fn refund_question_routes_to_ticket() {
        assert_eq!(
            routing_table().lookup("How do I get a refund for my ticket?"),
            Some(&Category::Ticket)
        );
    }

    #[test]
    fn each_category_has_rules() {
        for category in Category::all() {
            assert!(routing_table().rules().iter().any(|r| r.value() == category));
        }
    }

    #[test]
    fn sample_queries_route_as_expected() {
        let table = routing_table();
        assert_eq!(table.lookup("When is the Lakers game?"), Some(&Category::Event));
        assert_eq!(table.lookup("I can't log into my wallet"), Some(&Category::Account));
        assert_eq!(table.lookup("Explain NFTs to me"), Some(&Category::Faq));
        assert_eq!(table.lookup("good morning"), None);
    }
}
