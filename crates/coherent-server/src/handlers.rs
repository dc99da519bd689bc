//! HTTP request handlers.
//!
//! Thin transport over the pipeline: parse a body into a question, run it,
//! serialize the record, and map pipeline error kinds to status codes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use coherent_domain::{Confidence, EvidenceItem, LlmProvider, QueryId, QueryRecord, QueryStore};
use coherent_pipeline::{ErrorKind, Pipeline, PipelineError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared application state
pub struct AppState<L: LlmProvider, S: QueryStore> {
    /// The question-answering pipeline
    pub pipeline: Arc<Pipeline<L, S>>,
    /// Records returned by recent-searches when no valid limit is given
    pub default_history_limit: usize,
}

// derive(Clone) would require L: Clone and S: Clone
impl<L: LlmProvider, S: QueryStore> Clone for AppState<L, S> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            default_history_limit: self.default_history_limit,
        }
    }
}

/// Search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Question to answer
    #[serde(default)]
    pub question: Option<String>,
}

/// Language detection request
#[derive(Debug, Deserialize)]
pub struct DetectLanguageRequest {
    /// Text to classify
    #[serde(default)]
    pub text: Option<String>,
}

/// Language detection response
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectLanguageResponse {
    /// Language code
    pub language: String,
}

/// Query parameters for recent searches
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    /// Maximum number of records; kept as text so a bad value falls back to the default
    pub limit: Option<String>,
}

/// Answer block of a search response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    /// The single best answer
    pub best_answer: String,
    /// Why the chosen sources are trustworthy
    pub source_reasoning: String,
    /// Confidence score in [0, 100]
    pub confidence_level: Confidence,
    /// Synthesis time in milliseconds
    pub processing_time: u64,
}

/// A completed query as served over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Record id
    pub id: QueryId,
    /// The question as submitted
    pub question: String,
    /// Resolved language code
    pub language: String,
    /// Evidence the answer was built from
    pub search_results: Vec<EvidenceItem>,
    /// The answer
    pub ai_response: AiResponse,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<QueryRecord> for SearchResponse {
    fn from(record: QueryRecord) -> Self {
        Self {
            id: record.id,
            question: record.question,
            language: record.language,
            search_results: record.evidence,
            ai_response: AiResponse {
                best_answer: record.best_answer,
                source_reasoning: record.justification,
                confidence_level: record.confidence,
                processing_time: record.latency_ms,
            },
            created_at: record.created_at,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Always "ok" when the server answers
    pub status: String,
    /// Whether a language model key is configured
    pub llm_configured: bool,
    /// Whether live search credentials are configured
    pub search_configured: bool,
    /// Number of stored queries
    pub stored_queries: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Diagnostic detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Pipeline run failed
    Pipeline(PipelineError),
    /// Malformed or incomplete request body
    InvalidRequest(String),
    /// Unknown record
    NotFound(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Pipeline(e) => match e.kind() {
                ErrorKind::InvalidInput => {
                    (StatusCode::BAD_REQUEST, "Invalid request".to_string(), Some(e.to_string()))
                }
                ErrorKind::NoEvidence => (
                    StatusCode::NOT_FOUND,
                    "No search results found for the given question".to_string(),
                    None,
                ),
                kind => {
                    error!("Search request failed ({}): {}", kind, e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to process search request".to_string(),
                        Some(e.to_string()),
                    )
                }
            },
            AppError::InvalidRequest(details) => {
                (StatusCode::BAD_REQUEST, "Invalid request".to_string(), Some(details))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Internal(msg) => {
                error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::InvalidRequest(e.body_text())
    }
}

/// Non-blank string field, or an invalid-request error naming it
fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::InvalidRequest(format!("{} is required", field)))
}

/// POST /api/search - Answer a question
async fn search<L, S>(
    State(state): State<AppState<L, S>>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError>
where
    L: LlmProvider + 'static,
    S: QueryStore + 'static,
{
    let Json(request) = body?;
    let question = required(request.question, "question")?;

    let record = state.pipeline.run(&question).await?;
    Ok(Json(record.into()))
}

/// GET /api/recent-searches - Most recent queries first
async fn recent_searches<L, S>(
    State(state): State<AppState<L, S>>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<SearchResponse>>, AppError>
where
    L: LlmProvider + 'static,
    S: QueryStore + 'static,
{
    let limit = params
        .limit
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(state.default_history_limit);

    let records = state
        .pipeline
        .store()
        .list_recent(limit)
        .map_err(|e| AppError::Internal(format!("Failed to retrieve recent searches: {}", e)))?;

    Ok(Json(records.into_iter().map(SearchResponse::from).collect()))
}

/// GET /api/search/:id - One stored query
async fn get_search<L, S>(
    State(state): State<AppState<L, S>>,
    Path(id): Path<String>,
) -> Result<Json<SearchResponse>, AppError>
where
    L: LlmProvider + 'static,
    S: QueryStore + 'static,
{
    let not_found = || AppError::NotFound("Search query not found".to_string());

    let id = QueryId::from_string(&id).map_err(|_| not_found())?;
    let record = state
        .pipeline
        .store()
        .get_by_id(&id)
        .map_err(|e| AppError::Internal(format!("Failed to retrieve search query: {}", e)))?
        .ok_or_else(not_found)?;

    Ok(Json(record.into()))
}

/// POST /api/detect-language - Language code for a text
async fn detect_language<L, S>(
    State(state): State<AppState<L, S>>,
    body: Result<Json<DetectLanguageRequest>, JsonRejection>,
) -> Result<Json<DetectLanguageResponse>, AppError>
where
    L: LlmProvider + 'static,
    S: QueryStore + 'static,
{
    let Json(request) = body?;
    let text = required(request.text, "text")?;

    let language = state.pipeline.detect_language(&text).await;
    Ok(Json(DetectLanguageResponse { language }))
}

/// GET /health - Liveness and configuration summary
async fn health_check<L, S>(
    State(state): State<AppState<L, S>>,
) -> Result<Json<HealthCheckResponse>, AppError>
where
    L: LlmProvider + 'static,
    S: QueryStore + 'static,
{
    let stored_queries = state
        .pipeline
        .store()
        .len()
        .map_err(|e| AppError::Internal(format!("Failed to count stored queries: {}", e)))?;

    Ok(Json(HealthCheckResponse {
        status: "ok".to_string(),
        llm_configured: state.pipeline.llm_configured(),
        search_configured: state.pipeline.search_configured(),
        stored_queries,
    }))
}

/// Create the axum router with all routes
pub fn create_router<L, S>(state: AppState<L, S>) -> Router
where
    L: LlmProvider + 'static,
    S: QueryStore + 'static,
{
    Router::new()
        .route("/api/search", post(search::<L, S>))
        .route("/api/search/:id", get(get_search::<L, S>))
        .route("/api/recent-searches", get(recent_searches::<L, S>))
        .route("/api/detect-language", post(detect_language::<L, S>))
        .route("/health", get(health_check::<L, S>))
        .with_state(state)
}
