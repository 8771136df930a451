//! Query classifier.
//!
//! Picks the support desk for a query: the keyword routing table first, the
//! generative model when no keyword matches, FAQ when the model is missing
//! or gives nothing usable. Never fails.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::Category;
use crate::domain::routing::{routing_table, KeywordTable};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Which tier produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationMethod {
    /// Matched a keyword rule.
    Keyword,
    /// Parsed from the model's reply.
    Generative,
    /// Model unavailable or unusable; defaulted to FAQ.
    Fallback,
}

/// Result of classifying one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Human-readable provenance, sent to the client in the routing event.
    pub note: String,
    pub method: ClassificationMethod,
}

impl Classification {
    fn keyword(category: Category) -> Self {
        Self {
            category,
            note: format!("[Fast route] → {}", category.description()),
            method: ClassificationMethod::Keyword,
        }
    }

    fn generative(category: Category) -> Self {
        Self {
            category,
            note: format!("Routing to {}", category.display_name()),
            method: ClassificationMethod::Generative,
        }
    }

    fn fallback() -> Self {
        Self {
            category: Category::Faq,
            note: "Routing to FAQ (fallback)".to_string(),
            method: ClassificationMethod::Fallback,
        }
    }
}

/// Why the generative tier could not classify. Logged, never returned.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("no generative provider configured")]
    NotConfigured,

    #[error("generative call failed: {0}")]
    Provider(#[from] AIError),

    #[error("reply named no category: {0:?}")]
    Unrecognized(String),
}

/// Configuration for the classifier's generative tier.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 10,
        }
    }
}

/// Two-tier query classifier.
pub struct Classifier {
    table: &'static KeywordTable<Category>,
    provider: Option<Arc<dyn AIProvider>>,
    config: ClassifierConfig,
}

impl Classifier {
    /// Creates a classifier over the built-in routing table.
    pub fn new(provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self::with_config(provider, ClassifierConfig::default())
    }

    pub fn with_config(provider: Option<Arc<dyn AIProvider>>, config: ClassifierConfig) -> Self {
        Self {
            table: routing_table(),
            provider,
            config,
        }
    }

    /// Classifies a query. Keyword matches are deterministic.
    pub async fn classify(&self, query: &str) -> Classification {
        if let Some(category) = self.table.lookup(query) {
            tracing::debug!(category = %category, "Keyword route");
            return Classification::keyword(*category);
        }

        match self.classify_generative(query).await {
            Ok(category) => {
                tracing::debug!(category = %category, "Generative route");
                Classification::generative(category)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Classification failed, defaulting to FAQ");
                Classification::fallback()
            }
        }
    }

    async fn classify_generative(&self, query: &str) -> Result<Category, ClassificationError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(ClassificationError::NotConfigured)?;

        let request = CompletionRequest::new(RequestMetadata::new(uuid::Uuid::new_v4().to_string()))
            .with_message(MessageRole::User, classification_prompt(query))
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        let response = provider.complete(request).await?;
        let reply = response.content.trim().to_lowercase();

        Category::find_in(&reply).ok_or(ClassificationError::Unrecognized(reply))
    }
}

fn classification_prompt(query: &str) -> String {
    format!(
        "Classify this query for FanFirst support.\n\
         Reply with ONLY one word: ticket, event, account, or faq\n\n\
         Query: {}\n\n\
         Answer:",
        query
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    fn with_mock(mock: &MockAIProvider) -> Classifier {
        Classifier::new(Some(Arc::new(mock.clone())))
    }

    mod keyword_tier {
        use super::*;

        #[tokio::test]
        async fn refund_routes_to_ticket() {
            let result = Classifier::new(None)
                .classify("How do I get a refund for my ticket?")
                .await;

            assert_eq!(result.category, Category::Ticket);
            assert_eq!(result.method, ClassificationMethod::Keyword);
            assert_eq!(result.note, "[Fast route] → 🎫 Ticket Support");
        }

        #[tokio::test]
        async fn earlier_rule_wins_across_categories() {
            // "ticket" precedes "event" in the table.
            let result = Classifier::new(None)
                .classify("ticket for the event")
                .await;
            assert_eq!(result.category, Category::Ticket);
        }

        #[tokio::test]
        async fn keyword_match_skips_the_model() {
            let mock = MockAIProvider::new().with_response("faq");
            let classifier = with_mock(&mock);

            let result = classifier.classify("connect my wallet").await;

            assert_eq!(result.category, Category::Account);
            assert_eq!(mock.call_count(), 0);
        }

        #[tokio::test]
        async fn keyword_classification_is_repeatable() {
            let classifier = Classifier::new(None);
            let first = classifier.classify("Lakers schedule").await;
            let second = classifier.classify("Lakers schedule").await;
            assert_eq!(first, second);
            assert_eq!(first.category, Category::Event);
        }
    }

    mod generative_tier {
        use super::*;

        #[tokio::test]
        async fn parses_category_from_reply() {
            let mock = MockAIProvider::new().with_response("  Event.\n");
            let result = with_mock(&mock).classify("anything on tonight").await;

            assert_eq!(result.category, Category::Event);
            assert_eq!(result.method, ClassificationMethod::Generative);
            assert_eq!(result.note, "Routing to Event Info");
        }

        #[tokio::test]
        async fn sends_one_word_prompt_at_low_temperature() {
            let mock = MockAIProvider::new().with_response("account");
            with_mock(&mock).classify("zzz").await;

            let calls = mock.get_calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].temperature, Some(0.1));
            assert!(calls[0].messages[0].content.contains("Query: zzz"));
            assert!(calls[0].messages[0]
                .content
                .contains("ticket, event, account, or faq"));
        }

        #[tokio::test]
        async fn faq_reply_is_a_generative_route() {
            let mock = MockAIProvider::new().with_response("faq");
            let result = with_mock(&mock).classify("zzz").await;

            assert_eq!(result.category, Category::Faq);
            assert_eq!(result.method, ClassificationMethod::Generative);
            assert_eq!(result.note, "Routing to FAQ");
        }
    }

    mod fallback {
        use super::*;

        #[tokio::test]
        async fn no_provider_defaults_to_faq() {
            let result = Classifier::new(None).classify("zzz").await;

            assert_eq!(result.category, Category::Faq);
            assert_eq!(result.method, ClassificationMethod::Fallback);
            assert_eq!(result.note, "Routing to FAQ (fallback)");
        }

        #[tokio::test]
        async fn provider_error_defaults_to_faq() {
            let mock = MockAIProvider::new().with_error(MockError::Network {
                message: "reset".into(),
            });
            let result = with_mock(&mock).classify("zzz").await;

            assert_eq!(result.category, Category::Faq);
            assert_eq!(result.method, ClassificationMethod::Fallback);
        }

        #[tokio::test]
        async fn unrecognized_reply_defaults_to_faq() {
            let mock = MockAIProvider::new().with_response("I cannot say");
            let result = with_mock(&mock).classify("zzz").await;

            assert_eq!(result, Classification::fallback());
        }
    }
}
