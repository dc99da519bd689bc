//! SQLite-backed store

use crate::StoreError;
use chrono::{DateTime, SecondsFormat, Utc};
use coherent_domain::{Confidence, EvidenceItem, QueryId, QueryRecord, QueryStore};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT id, question, language, evidence, best_answer, justification, \
     confidence, latency_ms, created_at FROM queries";

/// Query log persisted in a SQLite database
///
/// The connection sits behind a mutex, so writes are serialized and the
/// store can be shared between request handlers.
///
/// # Examples
///
/// ```no_run
/// use coherent_store::SqliteStore;
///
/// let store = SqliteStore::new("coherent.db").unwrap();
/// ```
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<QueryRecord> {
        let id: String = row.get(0)?;
        let id = QueryId::from_string(&id).map_err(|e| conversion_error(0, Type::Text, e))?;

        let evidence: String = row.get(3)?;
        let evidence: Vec<EvidenceItem> = serde_json::from_str(&evidence)
            .map_err(|e| conversion_error(3, Type::Text, e.to_string()))?;

        let latency_ms: i64 = row.get(7)?;
        let created_at: String = row.get(8)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| conversion_error(8, Type::Text, e.to_string()))?
            .with_timezone(&Utc);

        Ok(QueryRecord {
            id,
            question: row.get(1)?,
            language: row.get(2)?,
            evidence,
            best_answer: row.get(4)?,
            justification: row.get(5)?,
            confidence: Confidence::from_int(row.get(6)?),
            latency_ms: u64::try_from(latency_ms).unwrap_or(0),
            created_at,
        })
    }
}

fn conversion_error(column: usize, ty: Type, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(StoreError::InvalidData(message)))
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

impl QueryStore for SqliteStore {
    type Error = StoreError;

    fn save(&self, record: QueryRecord) -> Result<QueryId, Self::Error> {
        let conn = self.conn();
        let id = record.id.to_string();

        let exists = conn
            .query_row("SELECT 1 FROM queries WHERE id = ?1", params![&id], |_| Ok(true))
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate(record.id));
        }

        let latency_ms = i64::try_from(record.latency_ms)
            .map_err(|_| StoreError::InvalidData(format!("latency out of range: {}", record.latency_ms)))?;

        conn.execute(
            "INSERT INTO queries (id, question, language, evidence, best_answer, justification, confidence, latency_ms, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &id,
                &record.question,
                &record.language,
                serde_json::to_string(&record.evidence)?,
                &record.best_answer,
                &record.justification,
                record.confidence.value(),
                latency_ms,
                timestamp(&record.created_at),
            ],
        )?;

        debug!("Stored query {}", id);
        Ok(record.id)
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<QueryRecord>, Self::Error> {
        let conn = self.conn();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY created_at DESC, seq DESC LIMIT ?1",
            SELECT_COLUMNS
        ))?;
        let records = stmt
            .query_map(params![limit], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn get_by_id(&self, id: &QueryId) -> Result<Option<QueryRecord>, Self::Error> {
        let conn = self.conn();
        let record = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.to_string()],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    fn len(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM queries", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
