//! SQLite-backed document store.
//!
//! Documents live as JSON text bodies in a single `documents` table
//! keyed by `(collection, key)`. Ordered and filtered scans go through
//! the JSON1 functions so the store itself stays schema-free: adding a
//! field to a document type needs no migration.

use std::path::{Path, PathBuf};

use log::warn;
use rusqlite::{params, Connection, ToSql};
use serde_json::Value;

use super::{Direction, Document, DocumentStore, StoreError};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    key INTEGER NOT NULL,
    body TEXT NOT NULL,
    PRIMARY KEY (collection, key)
)";

const PUT_SQL: &str = "INSERT INTO documents (collection, key, body) VALUES (?1, ?2, ?3)
    ON CONFLICT (collection, key) DO UPDATE SET body = excluded.body";
const UPDATE_FIELD_SQL: &str =
    "UPDATE documents SET body = json_set(body, ?3, ?4) WHERE collection = ?1 AND key = ?2";
const GET_FILTERED_SQL: &str =
    "SELECT body FROM documents WHERE collection = ?1 AND json_extract(body, ?2) = ?3";

/// Document store persisting to a SQLite file.
///
/// A connection is opened per operation on the stored path, so the
/// store handle is cheap to share across blocking tasks.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (or creates) the store at `path` and initializes its
    /// schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.open()?;
        conn.execute(SCHEMA_SQL, [])
            .map_err(|e| StoreError::backend("Failed to initialize document table", e))?;
        Ok(store)
    }

    fn open(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.path).map_err(|e| {
            StoreError::unavailable(format!(
                "cannot open database at {}: {e}",
                self.path.display()
            ))
        })
    }

    fn json_path(field: &str) -> String {
        format!("$.{field}")
    }

    /// Binds a JSON scalar as a SQL parameter. JSON1 maps text back to
    /// a JSON string and integers/reals to JSON numbers, so scalar
    /// round-trips are faithful.
    fn bind_scalar(value: &Value) -> Box<dyn ToSql> {
        match value {
            Value::Null => Box::new(None::<String>),
            Value::Bool(b) => Box::new(*b as i64),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Box::new(i)
                } else {
                    Box::new(n.as_f64())
                }
            }
            Value::String(s) => Box::new(s.clone()),
            other => Box::new(other.to_string()),
        }
    }

    fn rows_to_documents(rows: Vec<String>) -> Vec<Document> {
        rows.into_iter()
            .filter_map(|body| match serde_json::from_str(&body) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!("Skipping document with unparseable body: {e}");
                    None
                }
            })
            .collect()
    }
}

impl DocumentStore for SqliteStore {
    fn get_all_ordered(
        &self,
        collection: &str,
        order_field: &str,
        direction: Direction,
    ) -> Result<Vec<Document>, StoreError> {
        let conn = self.open()?;
        // Field names are internal constants, only the direction keyword
        // is interpolated.
        let sql = format!(
            "SELECT body FROM documents WHERE collection = ?1 \
             ORDER BY json_extract(body, ?2) {}",
            direction.as_sql()
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::backend("Failed to prepare ordered scan", e))?;
        let bodies = stmt
            .query_map(
                params![collection, Self::json_path(order_field)],
                |row| row.get::<_, String>(0),
            )
            .map_err(|e| StoreError::backend("Failed to run ordered scan", e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::backend("Failed to fetch ordered scan rows", e))?;
        Ok(Self::rows_to_documents(bodies))
    }

    fn get_filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare(GET_FILTERED_SQL)
            .map_err(|e| StoreError::backend("Failed to prepare filtered scan", e))?;
        let bound = Self::bind_scalar(value);
        let bodies = stmt
            .query_map(
                params![collection, Self::json_path(field), &*bound],
                |row| row.get::<_, String>(0),
            )
            .map_err(|e| StoreError::backend("Failed to run filtered scan", e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::backend("Failed to fetch filtered scan rows", e))?;
        Ok(Self::rows_to_documents(bodies))
    }

    fn put(&self, collection: &str, key: i64, document: &Document) -> Result<(), StoreError> {
        let conn = self.open()?;
        conn.execute(PUT_SQL, params![collection, key, document.to_string()])
            .map_err(|e| StoreError::backend("Failed to put document", e))?;
        Ok(())
    }

    fn update_field(
        &self,
        collection: &str,
        key: i64,
        field: &str,
        value: &Value,
    ) -> Result<(), StoreError> {
        let conn = self.open()?;
        let bound = Self::bind_scalar(value);
        // Unconditional by contract: zero affected rows is not an error.
        conn.execute(
            UPDATE_FIELD_SQL,
            params![collection, key, Self::json_path(field), &*bound],
        )
        .map_err(|e| StoreError::backend("Failed to update document field", e))?;
        Ok(())
    }
}
