//! Shared state behind every support session.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::application::classifier::{Classifier, ClassifierConfig};
use crate::application::response_pipeline::{PipelineConfig, ResponsePipeline};
use crate::domain::foundation::{Category, ConversationId};
use crate::domain::support::DomainProfile;
use crate::ports::{AIProvider, ConversationStore, ProviderInfo};

/// Tuning for the generative calls made during an exchange.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    pub classifier: ClassifierConfig,
    pub pipeline: PipelineConfig,
}

/// Owns the classifier, one pipeline per desk, the conversation store and
/// the per-conversation exchange locks. Shared across connections.
pub struct SessionOrchestrator {
    classifier: Classifier,
    ticket: ResponsePipeline,
    event: ResponsePipeline,
    account: ResponsePipeline,
    faq: ResponsePipeline,
    store: Arc<dyn ConversationStore>,
    provider_info: Option<ProviderInfo>,
    exchange_locks: Mutex<HashMap<ConversationId, Arc<Mutex<()>>>>,
}

impl SessionOrchestrator {
    pub fn new(provider: Option<Arc<dyn AIProvider>>, store: Arc<dyn ConversationStore>) -> Self {
        Self::with_config(provider, store, OrchestratorConfig::default())
    }

    pub fn with_config(
        provider: Option<Arc<dyn AIProvider>>,
        store: Arc<dyn ConversationStore>,
        config: OrchestratorConfig,
    ) -> Self {
        let pipeline = |category| {
            ResponsePipeline::new(
                DomainProfile::builtin(category),
                provider.clone(),
                config.pipeline.clone(),
            )
        };

        Self {
            ticket: pipeline(Category::Ticket),
            event: pipeline(Category::Event),
            account: pipeline(Category::Account),
            faq: pipeline(Category::Faq),
            classifier: Classifier::with_config(provider.clone(), config.classifier),
            provider_info: provider.as_ref().map(|p| p.provider_info()),
            store,
            exchange_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Pipeline answering for `category`.
    pub fn pipeline(&self, category: Category) -> &ResponsePipeline {
        match category {
            Category::Ticket => &self.ticket,
            Category::Event => &self.event,
            Category::Account => &self.account,
            Category::Faq => &self.faq,
        }
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    /// Whether a generative provider was injected.
    pub fn generative_configured(&self) -> bool {
        self.provider_info.is_some()
    }

    pub fn provider_info(&self) -> Option<&ProviderInfo> {
        self.provider_info.as_ref()
    }

    /// Holds the exchange lock for `id`. Exchanges on the same conversation
    /// run one at a time, so their user/assistant pairs never interleave.
    pub(crate) async fn lock_conversation(&self, id: ConversationId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.exchange_locks.lock().await;
            Arc::clone(locks.entry(id).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::storage::InMemoryConversationStore;
    use std::time::Duration;

    fn orchestrator(provider: Option<Arc<dyn AIProvider>>) -> SessionOrchestrator {
        SessionOrchestrator::new(provider, Arc::new(InMemoryConversationStore::new()))
    }

    #[test]
    fn pipelines_cover_every_category() {
        let orchestrator = orchestrator(None);
        for category in Category::all() {
            assert_eq!(orchestrator.pipeline(*category).category(), *category);
        }
    }

    #[test]
    fn reports_generative_configuration() {
        assert!(!orchestrator(None).generative_configured());

        let with_mock = orchestrator(Some(Arc::new(MockAIProvider::new())));
        assert!(with_mock.generative_configured());
        assert_eq!(with_mock.provider_info().unwrap().name, "mock");
    }

    #[tokio::test]
    async fn same_conversation_lock_is_exclusive() {
        let orchestrator = orchestrator(None);
        let id = ConversationId::new();

        let guard = orchestrator.lock_conversation(id).await;
        let blocked =
            tokio::time::timeout(Duration::from_millis(20), orchestrator.lock_conversation(id))
                .await;
        assert!(blocked.is_err());

        drop(guard);
        let acquired =
            tokio::time::timeout(Duration::from_millis(20), orchestrator.lock_conversation(id))
                .await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn different_conversations_do_not_contend() {
        let orchestrator = orchestrator(None);

        let _a = orchestrator.lock_conversation(ConversationId::new()).await;
        let b = tokio::time::timeout(
            Duration::from_millis(20),
            orchestrator.lock_conversation(ConversationId::new()),
        )
        .await;

        assert!(b.is_ok());
    }
}
