//! Coherent Storage Layer
//!
//! Implementations of the `QueryStore` trait: an append-only log of
//! completed queries, read back most-recent first or by id.
//!
//! # Backends
//!
//! - `MemoryStore`: process-local, lost on restart (default)
//! - `SqliteStore`: file-backed via SQLite
//!
//! Both are `Send + Sync` and meant to be constructed once and shared
//! behind an `Arc`.
//!
//! # Examples
//!
//! ```
//! use coherent_domain::QueryStore;
//! use coherent_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! assert!(store.is_empty().unwrap());
//! ```

#![warn(missing_docs)]

mod memory;
mod sqlite;

use coherent_domain::QueryId;
use thiserror::Error;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A record with this id already exists
    #[error("Duplicate query id: {0}")]
    Duplicate(QueryId),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::InvalidData(e.to_string())
    }
}
