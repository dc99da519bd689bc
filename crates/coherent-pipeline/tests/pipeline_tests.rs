//! End-to-end pipeline runs with offline collaborators

use async_trait::async_trait;
use coherent_domain::{CredibilityTier, EvidenceItem, QueryId, QueryRecord, QueryStore};
use coherent_llm::MockProvider;
use coherent_pipeline::{ErrorKind, Pipeline, PipelineError, Stage};
use coherent_search::{
    OnFailure, Retriever, SearchConfig, SearchCredentials, SearchError, SearchProvider,
    Stage as SearchStage,
};
use coherent_store::MemoryStore;
use coherent_synthesizer::{SynthesisConfig, DETECTION_PREFIX, EVIDENCE_HEADER};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Search provider with a fixed outcome
struct FixedSearch {
    outcome: fn() -> Result<Vec<EvidenceItem>, SearchError>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SearchProvider for FixedSearch {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn search(&self, _question: &str) -> Result<Vec<EvidenceItem>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.outcome)()
    }
}

fn fixed_retriever(outcome: fn() -> Result<Vec<EvidenceItem>, SearchError>) -> (Retriever, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = FixedSearch {
        outcome,
        calls: calls.clone(),
    };
    let retriever = Retriever::new(vec![SearchStage::new(provider).on_failure(OnFailure::FallbackIfEligible)]);
    (retriever, calls)
}

fn offline_retriever() -> Retriever {
    Retriever::standard(&SearchConfig::default(), SearchCredentials::default()).unwrap()
}

fn item(tier: CredibilityTier) -> EvidenceItem {
    EvidenceItem::new("title", "snippet", "https://example.com/a", "example.com", tier, None)
}

fn three_of_four_high() -> Result<Vec<EvidenceItem>, SearchError> {
    Ok(vec![
        item(CredibilityTier::High),
        item(CredibilityTier::High),
        item(CredibilityTier::High),
        item(CredibilityTier::Low),
    ])
}

fn nothing() -> Result<Vec<EvidenceItem>, SearchError> {
    Ok(Vec::new())
}

fn server_error() -> Result<Vec<EvidenceItem>, SearchError> {
    Err(SearchError::Provider {
        status: 500,
        body: "backend error".to_string(),
    })
}

fn pipeline<S: QueryStore>(retriever: Retriever, llm: MockProvider, store: Arc<S>) -> Pipeline<MockProvider, S> {
    Pipeline::new(retriever, Arc::new(llm), store, SynthesisConfig::default())
}

#[tokio::test]
async fn test_coffee_question_offline() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline(offline_retriever(), MockProvider::unavailable(), store.clone());

    let record = pipeline.run("does coffee raise blood pressure").await.unwrap();

    assert!(record.best_answer.starts_with("Yes, coffee can temporarily raise blood pressure"));
    assert_eq!(record.confidence.value(), 87);
    assert_eq!(record.language, "en");
    assert_eq!(record.evidence.len(), 4);
    assert_eq!(store.get_by_id(&record.id).unwrap(), Some(record));
}

#[tokio::test]
async fn test_stages_in_order() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline(offline_retriever(), MockProvider::unavailable(), store);

    let seen = Mutex::new(Vec::new());
    pipeline
        .run_observed("what is ai", |stage| seen.lock().unwrap().push(stage))
        .await
        .unwrap();

    assert_eq!(
        seen.into_inner().unwrap(),
        vec![
            Stage::Retrieving,
            Stage::Synthesizing,
            Stage::ResolvingLanguage,
            Stage::Persisting,
            Stage::Done
        ]
    );
}

#[tokio::test]
async fn test_empty_question_rejected_before_retrieval() {
    let (retriever, calls) = fixed_retriever(three_of_four_high);
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline(retriever, MockProvider::unavailable(), store.clone());

    for question in ["", "   \n"] {
        let mut stages = Vec::new();
        let err = pipeline.run_observed(question, |s| stages.push(s)).await.unwrap_err();
        assert_eq!(err, PipelineError::InvalidInput);
        assert!(stages.is_empty());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(store.is_empty().unwrap());
}

#[tokio::test]
async fn test_generic_confidence_from_evidence() {
    let (retriever, _) = fixed_retriever(three_of_four_high);
    let pipeline = pipeline(retriever, MockProvider::unavailable(), Arc::new(MemoryStore::new()));

    let record = pipeline.run("how deep is the ocean").await.unwrap();
    assert_eq!(record.confidence.value(), 86);
}

#[tokio::test]
async fn test_empty_evidence_is_no_evidence() {
    let (retriever, _) = fixed_retriever(nothing);
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline(retriever, MockProvider::unavailable(), store.clone());

    let mut stages = Vec::new();
    let err = pipeline.run_observed("q", |s| stages.push(s)).await.unwrap_err();

    assert_eq!(err, PipelineError::NoEvidence);
    assert_eq!(stages, vec![Stage::Retrieving, Stage::Failed(ErrorKind::NoEvidence)]);
    assert!(store.is_empty().unwrap());
}

#[tokio::test]
async fn test_fatal_search_error_is_retrieval_failure() {
    let (retriever, _) = fixed_retriever(server_error);
    let pipeline = pipeline(retriever, MockProvider::unavailable(), Arc::new(MemoryStore::new()));

    let err = pipeline.run("q").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RetrievalFailure);
    assert!(err.to_string().contains("HTTP 500"));
}

#[tokio::test]
async fn test_unknown_model_language_is_detected() {
    let mut llm = MockProvider::default();
    llm.add_response(EVIDENCE_HEADER, r#"{"bestAnswer": "Environ 11 km.", "confidenceLevel": 75}"#);
    llm.add_response(DETECTION_PREFIX, "fr");

    let (retriever, _) = fixed_retriever(three_of_four_high);
    let pipeline = pipeline(retriever, llm, Arc::new(MemoryStore::new()));

    let record = pipeline.run("quelle est la profondeur de l'océan").await.unwrap();
    assert_eq!(record.best_answer, "Environ 11 km.");
    assert_eq!(record.confidence.value(), 75);
    assert_eq!(record.language, "fr");
}

#[tokio::test]
async fn test_question_stored_as_submitted() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline(offline_retriever(), MockProvider::unavailable(), store);

    let record = pipeline.run("  what is ai  ").await.unwrap();
    assert_eq!(record.question, "  what is ai  ");
}

/// Store whose writes always fail
struct BrokenStore;

impl QueryStore for BrokenStore {
    type Error = String;

    fn save(&self, _record: QueryRecord) -> Result<QueryId, Self::Error> {
        Err("disk full".to_string())
    }

    fn list_recent(&self, _limit: usize) -> Result<Vec<QueryRecord>, Self::Error> {
        Ok(Vec::new())
    }

    fn get_by_id(&self, _id: &QueryId) -> Result<Option<QueryRecord>, Self::Error> {
        Ok(None)
    }

    fn len(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_store_failure_is_persistence_error() {
    let pipeline = pipeline(offline_retriever(), MockProvider::unavailable(), Arc::new(BrokenStore));

    let err = pipeline.run("what is ai").await.unwrap_err();
    assert_eq!(err, PipelineError::Persistence("disk full".to_string()));
    assert!(!err.kind().is_client_error());
}
