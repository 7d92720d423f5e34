//! Document store boundary.
//!
//! The repository persists interventions and details as independent
//! JSON documents through this narrow interface: ordered scans,
//! equality-filtered scans, keyed upserts, and single-field updates.
//! Anything that can satisfy those four operations can back the
//! tracker; [`SqliteStore`] is the durable implementation and
//! [`MemoryStore`] the ephemeral one.
//!
//! Timestamps cross this boundary in their RFC 3339 UTC string form,
//! which makes lexicographic ordering on a timestamp field agree with
//! chronological ordering.

use serde_json::Value;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A stored document. Always a JSON object.
pub type Document = Value;

/// Sort direction for ordered scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

/// Errors surfaced by document store implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend (SQLite) connection or query failure
    #[error("Store backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Store cannot be reached or is refusing service
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    /// Creates a backend error with a message and its rusqlite source.
    pub fn backend(message: impl Into<String>, source: rusqlite::Error) -> Self {
        StoreError::Backend {
            message: message.into(),
            source,
        }
    }

    /// Creates an unavailability error with a message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}

/// The external document store the repository talks to.
///
/// Semantics required of implementations:
///
/// - [`put`](DocumentStore::put) is an upsert: writing an existing key
///   silently overwrites the previous document (last-write-wins).
/// - [`update_field`](DocumentStore::update_field) is unconditional: a
///   missing key is not an error, it simply updates nothing.
/// - Ordered scans compare field values as JSON scalars (strings
///   lexicographically, numbers numerically).
pub trait DocumentStore: Send + Sync {
    /// Returns every document in `collection`, sorted by `order_field`.
    fn get_all_ordered(
        &self,
        collection: &str,
        order_field: &str,
        direction: Direction,
    ) -> Result<Vec<Document>, StoreError>;

    /// Returns the documents in `collection` whose `field` equals
    /// `value`.
    fn get_filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Writes `document` under `key`, overwriting any existing document
    /// with the same key.
    fn put(&self, collection: &str, key: i64, document: &Document) -> Result<(), StoreError>;

    /// Sets a single field of the document stored under `key`.
    fn update_field(
        &self,
        collection: &str,
        key: i64,
        field: &str,
        value: &Value,
    ) -> Result<(), StoreError>;
}
