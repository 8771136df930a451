// Support Swarm - HTTP/WebSocket server

use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use support_swarm::adapters::ai::{GeminiConfig, GeminiProvider};
use support_swarm::adapters::http::{support_router, SupportAppState};
use support_swarm::adapters::storage::InMemoryConversationStore;
use support_swarm::application::{
    ClassifierConfig, OrchestratorConfig, PipelineConfig, SessionOrchestrator,
};
use support_swarm::config::{AiConfig, AppConfig, ServerConfig};
use support_swarm::ports::AIProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!(environment = ?config.server.environment, "Starting Support Swarm");

    let provider = build_provider(&config.ai)?;
    let orchestrator = Arc::new(SessionOrchestrator::with_config(
        provider,
        Arc::new(InMemoryConversationStore::new()),
        OrchestratorConfig {
            classifier: ClassifierConfig {
                temperature: config.ai.classifier_temperature,
                ..ClassifierConfig::default()
            },
            pipeline: PipelineConfig {
                temperature: config.ai.response_temperature,
                ..PipelineConfig::default()
            },
        },
    ));

    let app = support_router(
        SupportAppState::new(orchestrator),
        &config.server.cors_origins_list(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Chat socket available at ws://{}/ws/chat", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// RUST_LOG wins over the configured level. JSON lines in production.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init();
    }
}

fn build_provider(ai: &AiConfig) -> anyhow::Result<Option<Arc<dyn AIProvider>>> {
    let Some(key) = ai.gemini_api_key.as_deref().filter(|k| !k.is_empty()) else {
        warn!("GEMINI_API_KEY not set, serving cached and default replies only");
        return Ok(None);
    };

    let provider = GeminiProvider::new(
        GeminiConfig::new(key)
            .with_model(&ai.model)
            .with_base_url(&ai.base_url)
            .with_timeout(ai.timeout())
            .with_max_retries(ai.max_retries),
    )?;

    info!(model = %ai.model, "Gemini provider configured");
    Ok(Some(Arc::new(provider)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
