//! Coherent Server
//!
//! HTTP front end for the question-answering pipeline.
//!
//! # Endpoints
//!
//! - `POST /api/search` answers a question and stores the result
//! - `GET /api/search/:id` returns a stored result
//! - `GET /api/recent-searches?limit=N` lists stored results, newest first
//! - `POST /api/detect-language` returns a language code for a text
//! - `GET /health` reports liveness and which backends are configured

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use coherent_domain::QueryStore;
use coherent_llm::{LlmError, OpenAiProvider};
use coherent_pipeline::Pipeline;
use coherent_search::{Retriever, SearchCredentials, SearchError};
use coherent_store::{MemoryStore, SqliteStore, StoreError};
use config::{CoherentConfig, HistoryBackend};
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the language model API key
pub const LLM_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Query store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Search providers could not be built
    #[error("Search setup error: {0}")]
    Search(#[from] SearchError),

    /// Language model provider could not be built
    #[error("LLM setup error: {0}")]
    Llm(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber, logging to stderr
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the pipeline from configuration and environment secrets
pub fn build_pipeline<S: QueryStore>(
    config: &CoherentConfig,
    store: Arc<S>,
) -> Result<Pipeline<OpenAiProvider, S>, ServerError> {
    let credentials = SearchCredentials::from_env();
    let retriever = Retriever::standard(&config.search, credentials)?;

    let api_key = std::env::var(LLM_API_KEY_VAR).ok();
    let llm = OpenAiProvider::new(
        config.llm.base_url.clone(),
        config.llm.model.clone(),
        api_key,
        config.llm.timeout(),
    )?
    .with_max_retries(config.llm.max_retries);

    Ok(Pipeline::new(retriever, Arc::new(llm), store, config.synthesis.clone()))
}

/// Start the HTTP server
///
/// Opens the configured store, builds the pipeline and serves until the
/// process is stopped.
pub async fn start_server(config: CoherentConfig) -> Result<(), ServerError> {
    config.validate()?;

    match config.history.backend {
        HistoryBackend::Memory => serve(config, Arc::new(MemoryStore::new())).await,
        HistoryBackend::Sqlite => {
            let store = SqliteStore::new(&config.history.sqlite_path)?;
            info!("Query history in {}", config.history.sqlite_path.display());
            serve(config, Arc::new(store)).await
        }
    }
}

async fn serve<S: QueryStore + 'static>(config: CoherentConfig, store: Arc<S>) -> Result<(), ServerError> {
    let pipeline = build_pipeline(&config, store)?;

    info!("Starting Coherent server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {} at {}", config.llm.model, config.llm.base_url);
    info!(
        "LLM configured: {}, search configured: {}",
        pipeline.llm_configured(),
        pipeline.search_configured()
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
        default_history_limit: config.history.default_limit,
    };
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
