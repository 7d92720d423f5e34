//! In-memory document store for tests and ephemeral runs.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use serde_json::Value;

use super::{Direction, Document, DocumentStore, StoreError};

/// Document store keeping everything in process memory.
///
/// Matches [`SqliteStore`](super::SqliteStore) semantics: keyed
/// upserts, unconditional field updates, and scalar field comparisons
/// for ordering and filtering.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<i64, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn field<'a>(doc: &'a Document, field: &str) -> Option<&'a Value> {
        doc.as_object().and_then(|obj| obj.get(field))
    }

    /// Orders JSON scalars: missing first, then by type, numbers
    /// numerically, strings lexicographically.
    fn cmp_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(Value::Number(x)), Some(Value::Number(y))) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
            (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn get_all_ordered(
        &self,
        collection: &str,
        order_field: &str,
        direction: Direction,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))?;
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default();
        docs.sort_by(|a, b| {
            let ord = Self::cmp_field(Self::field(a, order_field), Self::field(b, order_field));
            match direction {
                Direction::Ascending => ord,
                Direction::Descending => ord.reverse(),
            }
        });
        Ok(docs)
    }

    fn get_filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))?;
        Ok(collections
            .get(collection)
            .map(|c| {
                c.values()
                    .filter(|doc| Self::field(doc, field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn put(&self, collection: &str, key: i64, document: &Document) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key, document.clone());
        Ok(())
    }

    fn update_field(
        &self,
        collection: &str,
        key: i64,
        field: &str,
        value: &Value,
    ) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))?;
        if let Some(doc) = collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(&key))
        {
            if let Some(obj) = doc.as_object_mut() {
                obj.insert(field.to_string(), value.clone());
            }
        }
        // Missing key updates nothing, by contract.
        Ok(())
    }
}
