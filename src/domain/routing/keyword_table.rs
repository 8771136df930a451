//! Ordered first-match keyword tables.
//!
//! A [`KeywordTable`] is an ordered list of `(pattern, value)` rules. Lookup
//! lower-cases the input and returns the value of the *first* rule whose
//! pattern occurs as a substring. Order is load-bearing: specific patterns
//! ("qr code") must sit before broader ones ("qr"), and narrow intents
//! ("cancel", "refund") before catch-alls ("how").
//!
//! The same table type backs both category routing rules and per-domain
//! cached responses.

use crate::domain::foundation::Category;

/// One `(pattern, value)` association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule<T> {
    pattern: String,
    value: T,
}

impl<T> KeywordRule<T> {
    /// Creates a rule. The pattern is normalised to lowercase.
    pub fn new(pattern: impl Into<String>, value: T) -> Self {
        Self {
            pattern: pattern.into().to_lowercase(),
            value,
        }
    }

    /// The lowercase substring this rule looks for.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The value returned when this rule fires.
    pub fn value(&self) -> &T {
        &self.value
    }

    fn matches(&self, lowered_input: &str) -> bool {
        lowered_input.contains(self.pattern.as_str())
    }
}

/// Routing rule: pattern → category.
pub type CategoryRule = KeywordRule<Category>;

/// Cached response: pattern → canned reply text.
pub type CachedResponse = KeywordRule<&'static str>;

/// Priority-ordered keyword table with first-match-wins lookup.
///
/// Rules are fixed at construction and never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable<T> {
    rules: Vec<KeywordRule<T>>,
}

impl<T> KeywordTable<T> {
    /// Builds a table from rules in priority order.
    pub fn new(rules: Vec<KeywordRule<T>>) -> Self {
        Self { rules }
    }

    /// Builds a table from `(pattern, value)` pairs in priority order.
    pub fn from_pairs<I, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(pattern, value)| KeywordRule::new(pattern, value))
                .collect(),
        )
    }

    /// Returns the first rule whose pattern occurs in `input`
    /// (case-insensitive).
    pub fn first_match(&self, input: &str) -> Option<&KeywordRule<T>> {
        let lowered = input.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }

    /// Returns the value of the first matching rule.
    pub fn lookup(&self, input: &str) -> Option<&T> {
        self.first_match(input).map(KeywordRule::value)
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[KeywordRule<T>] {
        &self.rules
    }

    /// Position of a pattern in the table, if present.
    pub fn position(&self, pattern: &str) -> Option<usize> {
        let lowered = pattern.to_lowercase();
        self.rules.iter().position(|r| r.pattern == lowered)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
