//! Core Pipeline implementation

use crate::error::PipelineError;
use crate::stage::Stage;
use chrono::Utc;
use coherent_domain::language::is_unresolved;
use coherent_domain::{LlmProvider, QueryId, QueryRecord, QueryStore};
use coherent_search::Retriever;
use coherent_synthesizer::{LanguageDetector, SynthesisConfig, Synthesizer};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answers questions: retrieve, synthesize, resolve language, persist
///
/// Strictly sequential and never retries; fallbacks live inside the
/// retriever and the synthesizer. Shared between request handlers behind
/// an `Arc`.
pub struct Pipeline<L, S>
where
    L: LlmProvider,
    S: QueryStore,
{
    retriever: Retriever,
    synthesizer: Synthesizer<L>,
    detector: LanguageDetector<L>,
    llm: Arc<L>,
    store: Arc<S>,
}

/// Steps a run through its stages, reporting each one
struct Progress<F: FnMut(Stage)> {
    current: Stage,
    observer: F,
}

impl<F: FnMut(Stage)> Progress<F> {
    fn start(mut observer: F) -> Self {
        observer(Stage::Retrieving);
        Self {
            current: Stage::Retrieving,
            observer,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.current.next() {
            debug!("Pipeline stage: {} → {}", self.current, next);
            self.current = next;
            (self.observer)(next);
        }
    }

    /// Enter `Failed`; a run that already ended reports nothing more
    fn fail(&mut self, error: PipelineError) -> PipelineError {
        if self.current.is_terminal() {
            return error;
        }
        let failed = Stage::Failed(error.kind());
        warn!("Pipeline failed while {}: {}", self.current, error);
        self.current = failed;
        (self.observer)(failed);
        error
    }
}

impl<L, S> Pipeline<L, S>
where
    L: LlmProvider,
    S: QueryStore,
{
    /// Create a pipeline
    ///
    /// `llm` is shared by the synthesizer and the language detector.
    pub fn new(retriever: Retriever, llm: Arc<L>, store: Arc<S>, config: SynthesisConfig) -> Self {
        Self {
            retriever,
            synthesizer: Synthesizer::new(llm.clone(), config.clone()),
            detector: LanguageDetector::new(llm.clone(), &config),
            llm,
            store,
        }
    }

    /// The query store records are written to
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether a live search provider is configured
    pub fn search_configured(&self) -> bool {
        self.retriever.has_live_provider()
    }

    /// Whether the language model is configured
    pub fn llm_configured(&self) -> bool {
        self.llm.is_configured()
    }

    /// Language of `text`, falling back to script matching
    pub async fn detect_language(&self, text: &str) -> String {
        self.detector.resolve(text).await
    }

    /// Answer `question` and store the result
    pub async fn run(&self, question: &str) -> Result<QueryRecord, PipelineError> {
        self.run_observed(question, |_| {}).await
    }

    /// Like [`Pipeline::run`], calling `observer` on every stage entered
    ///
    /// An empty question is rejected before any stage is entered.
    pub async fn run_observed<F>(&self, question: &str, observer: F) -> Result<QueryRecord, PipelineError>
    where
        F: FnMut(Stage) + Send,
    {
        let query = question.trim();
        if query.is_empty() {
            return Err(PipelineError::InvalidInput);
        }

        info!("Answering question: \"{}\"", query);
        let mut progress = Progress::start(observer);

        let evidence = match self.retriever.retrieve(query).await {
            Ok(evidence) if evidence.is_empty() => return Err(progress.fail(PipelineError::NoEvidence)),
            Ok(evidence) => evidence,
            Err(e) => return Err(progress.fail(PipelineError::RetrievalFailure(e.to_string()))),
        };
        progress.advance();

        let analysis = match self.synthesizer.synthesize(query, &evidence).await {
            Ok(analysis) => analysis,
            Err(e) => return Err(progress.fail(PipelineError::SynthesisFailure(e.to_string()))),
        };
        progress.advance();

        let language = if is_unresolved(&analysis.language_guess) {
            self.detector.resolve(question).await
        } else {
            analysis.language_guess
        };
        progress.advance();

        let record = QueryRecord {
            id: QueryId::new(),
            question: question.to_string(),
            language,
            evidence,
            best_answer: analysis.best_answer,
            justification: analysis.justification,
            confidence: analysis.confidence,
            latency_ms: analysis.latency_ms,
            created_at: Utc::now(),
        };

        if let Err(e) = self.store.save(record.clone()) {
            return Err(progress.fail(PipelineError::Persistence(e.to_string())));
        }
        progress.advance();

        info!(
            "Stored query {} (language {}, confidence {}, {}ms)",
            record.id, record.language, record.confidence, record.latency_ms
        );
        Ok(record)
    }
}
