//! In-process store

use crate::StoreError;
use coherent_domain::{QueryId, QueryRecord, QueryStore};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Default)]
struct Log {
    records: Vec<QueryRecord>,
    by_id: HashMap<QueryId, usize>,
}

/// Query log kept in memory for the life of the process
#[derive(Default)]
pub struct MemoryStore {
    log: RwLock<Log>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueryStore for MemoryStore {
    type Error = StoreError;

    fn save(&self, record: QueryRecord) -> Result<QueryId, Self::Error> {
        let mut log = self.log.write().unwrap_or_else(PoisonError::into_inner);

        let id = record.id;
        if log.by_id.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }

        let position = log.records.len();
        log.records.push(record);
        log.by_id.insert(id, position);
        Ok(id)
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<QueryRecord>, Self::Error> {
        let log = self.log.read().unwrap_or_else(PoisonError::into_inner);

        // Newest insertion first; the stable sort keeps that order for equal timestamps
        let mut recent: Vec<&QueryRecord> = log.records.iter().rev().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(recent.into_iter().take(limit).cloned().collect())
    }

    fn get_by_id(&self, id: &QueryId) -> Result<Option<QueryRecord>, Self::Error> {
        let log = self.log.read().unwrap_or_else(PoisonError::into_inner);
        Ok(log.by_id.get(id).map(|&i| log.records[i].clone()))
    }

    fn len(&self) -> Result<usize, Self::Error> {
        Ok(self.log.read().unwrap_or_else(PoisonError::into_inner).records.len())
    }
}
