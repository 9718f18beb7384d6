//! nego-market server binary.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nego_market::adapters::ai::{DisabledReasoner, GeminiConfig, GeminiReasoner};
use nego_market::adapters::http::{self, AppState};
use nego_market::adapters::memory::{InMemoryItemRepository, InMemoryNegotiationStore};
use nego_market::adapters::postgres::{
    self, PostgresItemRepository, PostgresMessageRepository, PostgresNegotiationLogRepository,
};
use nego_market::config::{AppConfig, LogFormat};
use nego_market::ports::{
    ItemRepository, MessageRepository, NegotiationLogRepository, NegotiationReasoner,
};

type Stores = (
    Arc<dyn ItemRepository>,
    Arc<dyn MessageRepository>,
    Arc<dyn NegotiationLogRepository>,
);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let (items, messages, logs) = build_stores(&config).await?;
    let reasoner = build_reasoner(&config)?;

    let state = AppState::new(items, messages, logs, reasoner)
        .with_draft_settings(config.draft_settings())
        .with_max_commit_retries(config.negotiation.max_commit_retries);
    let app = http::app(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    match config.server.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn build_stores(config: &AppConfig) -> Result<Stores, Box<dyn std::error::Error>> {
    let Some(url) = config.database.url() else {
        warn!("no database configured, using in-memory storage");
        let store = Arc::new(InMemoryNegotiationStore::new());
        let items: Arc<dyn ItemRepository> = Arc::new(InMemoryItemRepository::new());
        let messages: Arc<dyn MessageRepository> = store.clone();
        let logs: Arc<dyn NegotiationLogRepository> = store;
        return Ok((items, messages, logs));
    };

    let pool = postgres::connect(url, &config.database).await?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool).await?;
        info!("database migrations applied");
    }

    let items: Arc<dyn ItemRepository> = Arc::new(PostgresItemRepository::new(pool.clone()));
    let messages: Arc<dyn MessageRepository> =
        Arc::new(PostgresMessageRepository::new(pool.clone()));
    let logs: Arc<dyn NegotiationLogRepository> =
        Arc::new(PostgresNegotiationLogRepository::new(pool));
    Ok((items, messages, logs))
}

fn build_reasoner(
    config: &AppConfig,
) -> Result<Arc<dyn NegotiationReasoner>, Box<dyn std::error::Error>> {
    let Some(api_key) = config.ai.gemini_api_key() else {
        warn!("no Gemini API key configured, negotiation drafts are disabled");
        let disabled: Arc<dyn NegotiationReasoner> = Arc::new(DisabledReasoner);
        return Ok(disabled);
    };

    let gemini = GeminiReasoner::new(
        GeminiConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?;
    info!(model = %config.ai.model, "negotiation reasoner ready");
    let gemini: Arc<dyn NegotiationReasoner> = Arc::new(gemini);
    Ok(gemini)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
