//! Three-tier reply resolution shared by every support desk.
//!
//! Cache, then generative, then default. A cache hit never reaches the model,
//! and a generative failure hands over to the desk's default text instead of
//! propagating.
//!
//! A failure before the first model fragment yields only the default text.
//! A failure mid-stream keeps the fragments already sent and appends the
//! default text after them. This matches the behaviour of the FanFirst
//! support service this crate replaces. Keep it.

use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;

use crate::domain::conversation::Message;
use crate::domain::foundation::Category;
use crate::domain::support::{DomainProfile, TextChunks};
use crate::ports::{AIProvider, ChunkStream, CompletionRequest, MessageRole, RequestMetadata};

/// Which tier a resolution started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Cache,
    Generative,
    Default,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Cache => "cache",
            Tier::Generative => "generative",
            Tier::Default => "default",
        }
    }
}

/// Settings for generative requests.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// Reply resolver for one desk.
#[derive(Clone)]
pub struct ResponsePipeline {
    profile: &'static DomainProfile,
    provider: Option<Arc<dyn AIProvider>>,
    config: PipelineConfig,
}

/// Unfold state for the lazy fragment stream.
enum Source {
    Opening {
        provider: Arc<dyn AIProvider>,
        request: CompletionRequest,
    },
    Live(ChunkStream),
    Slices(TextChunks<'static>),
}

impl ResponsePipeline {
    pub fn new(
        profile: &'static DomainProfile,
        provider: Option<Arc<dyn AIProvider>>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            profile,
            provider,
            config,
        }
    }

    /// Pipeline over the built-in profile for `category`.
    pub fn builtin(category: Category, provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self::new(
            DomainProfile::builtin(category),
            provider,
            PipelineConfig::default(),
        )
    }

    pub fn category(&self) -> Category {
        self.profile.category
    }

    /// Whether the desk forwards the caller's user id to the model.
    fn forwards_user_id(&self) -> bool {
        matches!(self.profile.category, Category::Ticket | Category::Account)
    }

    /// Tier that will answer `query`, without producing anything.
    pub fn tier_for(&self, query: &str) -> Tier {
        if self.profile.cached(query).is_some() {
            Tier::Cache
        } else if self.provider.is_some() {
            Tier::Generative
        } else {
            Tier::Default
        }
    }

    /// Resolves a reply as a lazy stream of fragments.
    ///
    /// `history` already holds the current query as its last entry. The
    /// model only sees the query itself.
    pub fn resolve(
        &self,
        query: &str,
        history: &[Message],
        metadata: RequestMetadata,
    ) -> BoxStream<'static, String> {
        let profile = self.profile;

        let (tier, source) = match (profile.cached(query), &self.provider) {
            (Some(hit), _) => (Tier::Cache, Source::Slices(profile.chunks(*hit.value()))),
            (None, Some(provider)) => (
                Tier::Generative,
                Source::Opening {
                    provider: Arc::clone(provider),
                    request: self.generative_request(query, metadata),
                },
            ),
            (None, None) => (
                Tier::Default,
                Source::Slices(profile.chunks(profile.default_text)),
            ),
        };

        tracing::info!(
            category = %profile.category,
            tier = tier.as_str(),
            history_len = history.len(),
            "Resolving reply"
        );

        stream::unfold(source, move |source| next_fragment(source, profile)).boxed()
    }

    fn generative_request(&self, query: &str, metadata: RequestMetadata) -> CompletionRequest {
        let metadata = if self.forwards_user_id() {
            metadata
        } else {
            RequestMetadata {
                user_id: None,
                ..metadata
            }
        };

        let request = CompletionRequest::new(metadata)
            .with_system_prompt(self.profile.system_prompt)
            .with_message(MessageRole::User, query)
            .with_temperature(self.config.temperature);

        match self.config.max_tokens {
            Some(max) => request.with_max_tokens(max),
            None => request,
        }
    }
}

/// Yields the next fragment, switching to the default text if the model fails.
async fn next_fragment(
    mut source: Source,
    profile: &'static DomainProfile,
) -> Option<(String, Source)> {
    loop {
        source = match source {
            Source::Opening { provider, request } => match provider.stream_complete(request).await
            {
                Ok(stream) => Source::Live(stream),
                Err(err) => {
                    tracing::warn!(
                        category = %profile.category,
                        error = %err,
                        "Generative reply failed, using default"
                    );
                    Source::Slices(profile.chunks(profile.default_text))
                }
            },
            Source::Live(mut stream) => match stream.next().await {
                Some(Ok(chunk)) if chunk.delta.is_empty() => Source::Live(stream),
                Some(Ok(chunk)) => return Some((chunk.delta, Source::Live(stream))),
                Some(Err(err)) => {
                    tracing::warn!(
                        category = %profile.category,
                        error = %err,
                        "Generative stream broke, using default"
                    );
                    Source::Slices(profile.chunks(profile.default_text))
                }
                None => return None,
            },
            Source::Slices(mut chunks) => {
                return chunks
                    .next()
                    .map(|slice| (slice.to_string(), Source::Slices(chunks)))
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::support::catalog::{account, event, faq, ticket};

    async fn collect(stream: BoxStream<'static, String>) -> Vec<String> {
        stream.collect().await
    }

    fn history(query: &str) -> Vec<Message> {
        vec![Message::user(query)]
    }

    mod cache_tier {
        use super::*;

        #[tokio::test]
        async fn refund_query_streams_refund_policy() {
            let pipeline = ResponsePipeline::builtin(Category::Ticket, None);
            let query = "How do I get a refund for my ticket?";

            let fragments = collect(pipeline.resolve(query, &history(query), RequestMetadata::new("t"))).await;

            assert_eq!(fragments.concat(), ticket::REFUND);
            assert!(fragments.iter().all(|f| f.chars().count() <= 20));
            assert!(fragments[..fragments.len() - 1]
                .iter()
                .all(|f| f.chars().count() == 20));
        }

        #[tokio::test]
        async fn qr_code_beats_qr() {
            let pipeline = ResponsePipeline::builtin(Category::Ticket, None);
            let fragments = collect(pipeline.resolve("qr code", &[], RequestMetadata::new("t"))).await;
            assert_eq!(fragments.concat(), ticket::QR_CODE);
        }

        #[tokio::test]
        async fn cache_hit_never_calls_the_model() {
            let mock = MockAIProvider::new().with_response("model text");
            let pipeline = ResponsePipeline::builtin(Category::Account, Some(Arc::new(mock.clone())));

            let fragments = collect(pipeline.resolve("my fandom score", &[], RequestMetadata::new("t"))).await;

            assert_eq!(fragments.concat(), account::FANDOM);
            assert_eq!(mock.call_count(), 0);
            assert_eq!(pipeline.tier_for("my fandom score"), Tier::Cache);
        }

        #[tokio::test]
        async fn stream_is_restartable() {
            let pipeline = ResponsePipeline::builtin(Category::Event, None);
            let first = collect(pipeline.resolve("lakers", &[], RequestMetadata::new("t"))).await;
            let second = collect(pipeline.resolve("lakers", &[], RequestMetadata::new("t"))).await;
            assert_eq!(first, second);
            assert_eq!(first.concat(), event::LAKERS);
        }
    }

    mod generative_tier {
        use super::*;

        #[tokio::test]
        async fn forwards_model_fragments_verbatim() {
            let mock = MockAIProvider::new().with_response("Gates open at six.");
            let pipeline = ResponsePipeline::builtin(Category::Faq, Some(Arc::new(mock.clone())));

            let fragments = collect(pipeline.resolve("zzz", &[], RequestMetadata::new("t"))).await;

            assert_eq!(fragments, vec!["Gates ", "open ", "at ", "six."]);
            assert_eq!(pipeline.tier_for("zzz"), Tier::Generative);
        }

        #[tokio::test]
        async fn request_carries_desk_framing() {
            let mock = MockAIProvider::new().with_response("ok");
            let pipeline = ResponsePipeline::builtin(Category::Ticket, Some(Arc::new(mock.clone())));

            collect(pipeline.resolve(
                "zzz",
                &[],
                RequestMetadata::new("t").with_user(Some("user-1")),
            ))
            .await;

            let call = &mock.get_calls()[0];
            assert!(call
                .system_prompt
                .as_deref()
                .unwrap()
                .starts_with("You are Ticket Support"));
            assert_eq!(call.messages[0].content, "zzz");
            assert_eq!(call.temperature, Some(0.7));
            assert_eq!(call.metadata.user_id.as_deref(), Some("user-1"));
        }

        #[tokio::test]
        async fn event_desk_drops_user_id() {
            let mock = MockAIProvider::new().with_response("ok");
            let pipeline = ResponsePipeline::builtin(Category::Event, Some(Arc::new(mock.clone())));

            collect(pipeline.resolve(
                "zzz",
                &[],
                RequestMetadata::new("t").with_user(Some("user-1")),
            ))
            .await;

            assert!(mock.get_calls()[0].metadata.user_id.is_none());
        }
    }

    mod default_tier {
        use super::*;

        #[tokio::test]
        async fn no_provider_uses_default() {
            let pipeline = ResponsePipeline::builtin(Category::Faq, None);

            let fragments = collect(pipeline.resolve("zzz", &[], RequestMetadata::new("t"))).await;

            assert_eq!(fragments.concat(), faq::DEFAULT);
            assert_eq!(pipeline.tier_for("zzz"), Tier::Default);
        }

        #[tokio::test]
        async fn failure_to_open_stream_falls_through() {
            let mock = MockAIProvider::new().with_error(MockError::Unavailable {
                message: "down".into(),
            });
            let pipeline = ResponsePipeline::builtin(Category::Account, Some(Arc::new(mock)));

            let fragments = collect(pipeline.resolve("zzz", &[], RequestMetadata::new("t"))).await;

            assert_eq!(fragments.concat(), account::DEFAULT);
        }

        #[tokio::test]
        async fn mid_stream_failure_continues_with_default() {
            let mock = MockAIProvider::new().with_interrupted_stream(
                "Partial ",
                MockError::Network {
                    message: "reset".into(),
                },
            );
            let pipeline = ResponsePipeline::builtin(Category::Ticket, Some(Arc::new(mock)));

            let fragments = collect(pipeline.resolve("zzz", &[], RequestMetadata::new("t"))).await;

            assert_eq!(fragments[0], "Partial ");
            assert_eq!(fragments[1..].concat(), ticket::DEFAULT);
        }
    }
}
