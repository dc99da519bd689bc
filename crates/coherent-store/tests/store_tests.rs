//! Both backends against the same expectations

use chrono::{Duration, Utc};
use coherent_domain::{Confidence, CredibilityTier, EvidenceItem, QueryId, QueryRecord, QueryStore};
use coherent_store::{MemoryStore, SqliteStore, StoreError};
use std::sync::Arc;

fn record(question: &str, age_secs: i64) -> QueryRecord {
    QueryRecord {
        id: QueryId::new(),
        question: question.to_string(),
        language: "ar".to_string(),
        evidence: vec![
            EvidenceItem::new(
                "Kayak",
                "Compare flight prices",
                "https://www.kayak.com",
                "kayak.com",
                CredibilityTier::High,
                Some("1 day ago".to_string()),
            ),
            EvidenceItem::new("Blog", "Trip notes", "https://blog.net/x", "blog.net", CredibilityTier::Low, None),
        ],
        best_answer: "أفضل المواقع لحجز الطيران".to_string(),
        justification: "Trusted platforms".to_string(),
        confidence: Confidence::from_int(93),
        latency_ms: 1234,
        created_at: Utc::now() - Duration::seconds(age_secs),
    }
}

fn check_roundtrip<S: QueryStore<Error = StoreError>>(store: &S) {
    let rec = record("ما هو أفضل موقع لحجز طيران", 0);
    let id = store.save(rec.clone()).unwrap();
    assert_eq!(id, rec.id);

    let loaded = store.get_by_id(&id).unwrap().expect("record should exist");
    assert_eq!(loaded, rec);

    assert!(store.get_by_id(&QueryId::new()).unwrap().is_none());
}

fn check_recent_ordering<S: QueryStore<Error = StoreError>>(store: &S) {
    store.save(record("oldest", 300)).unwrap();
    store.save(record("newest", 0)).unwrap();
    store.save(record("middle", 100)).unwrap();

    let recent = store.list_recent(2).unwrap();
    let questions: Vec<&str> = recent.iter().map(|r| r.question.as_str()).collect();
    assert_eq!(questions, vec!["newest", "middle"]);

    assert_eq!(store.list_recent(10).unwrap().len(), 3);
    assert!(store.list_recent(0).unwrap().is_empty());
}

fn check_duplicate<S: QueryStore<Error = StoreError>>(store: &S) {
    let rec = record("q", 0);
    store.save(rec.clone()).unwrap();
    assert!(matches!(store.save(rec), Err(StoreError::Duplicate(_))));
    assert_eq!(store.len().unwrap(), 1);
}

fn check_concurrent_writes<S: QueryStore<Error = StoreError> + 'static>(store: Arc<S>) {
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..10 {
                    store.save(record(&format!("{}-{}", t, i), 0)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len().unwrap(), 80);
    let all = store.list_recent(100).unwrap();
    assert_eq!(all.len(), 80);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[test]
fn test_memory_roundtrip() {
    check_roundtrip(&MemoryStore::new());
}

#[test]
fn test_memory_recent_ordering() {
    check_recent_ordering(&MemoryStore::new());
}

#[test]
fn test_memory_duplicate() {
    check_duplicate(&MemoryStore::new());
}

#[test]
fn test_memory_concurrent_writes() {
    check_concurrent_writes(Arc::new(MemoryStore::new()));
}

#[test]
fn test_sqlite_roundtrip() {
    check_roundtrip(&SqliteStore::new(":memory:").unwrap());
}

#[test]
fn test_sqlite_recent_ordering() {
    check_recent_ordering(&SqliteStore::new(":memory:").unwrap());
}

#[test]
fn test_sqlite_duplicate() {
    check_duplicate(&SqliteStore::new(":memory:").unwrap());
}

#[test]
fn test_sqlite_concurrent_writes() {
    check_concurrent_writes(Arc::new(SqliteStore::new(":memory:").unwrap()));
}

#[test]
fn test_sqlite_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coherent.db");

    let rec = record("persisted", 0);
    {
        let store = SqliteStore::new(&path).unwrap();
        store.save(rec.clone()).unwrap();
    }

    let reopened = SqliteStore::new(&path).unwrap();
    assert_eq!(reopened.len().unwrap(), 1);
    assert_eq!(reopened.get_by_id(&rec.id).unwrap(), Some(rec));
}
