#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use jiff::Timestamp;
use serde_json::Value;
use wrench_core::repository::DETAILS;
use wrench_core::{
    Direction, Document, DocumentStore, Intervention, InterventionDetail, InterventionRepository,
    MemoryStore, StoreError,
};

/// Repository over a fresh in-memory store.
pub fn memory_repository() -> InterventionRepository {
    InterventionRepository::new(Arc::new(MemoryStore::new()))
}

/// Repository over a shared store, so tests can inspect raw documents.
pub fn repository_over(store: Arc<dyn DocumentStore>) -> InterventionRepository {
    InterventionRepository::new(store)
}

/// An intervention with `n` details, dated `date` (RFC 3339).
pub fn intervention_with_details(id: i64, date: &str, n: usize) -> Intervention {
    let timestamp: Timestamp = date.parse().expect("valid test timestamp");
    let mut intervention = Intervention::pending(id, timestamp);
    intervention.description = Some(format!("Service event {id}"));
    for i in 0..n {
        let detail_id = id * 100 + i as i64;
        intervention.details.push(InterventionDetail {
            id: detail_id,
            intervention_id: id,
            operation_id: 10 + i as i64,
            operation_name: format!("Operation {i}"),
            note: i as i32,
        });
    }
    intervention
}

/// Store double that refuses every operation, simulating an outage.
pub struct FailingStore;

impl DocumentStore for FailingStore {
    fn get_all_ordered(
        &self,
        _collection: &str,
        _order_field: &str,
        _direction: Direction,
    ) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::unavailable("simulated outage"))
    }

    fn get_filtered(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::unavailable("simulated outage"))
    }

    fn put(&self, _collection: &str, _key: i64, _document: &Document) -> Result<(), StoreError> {
        Err(StoreError::unavailable("simulated outage"))
    }

    fn update_field(
        &self,
        _collection: &str,
        _key: i64,
        _field: &str,
        _value: &Value,
    ) -> Result<(), StoreError> {
        Err(StoreError::unavailable("simulated outage"))
    }
}

/// Store double whose ordered scans wait for an explicit release, so a
/// test can act while a load is in flight. Returns the store, a
/// receiver that fires when a scan has started, and a sender that lets
/// the scan proceed.
pub fn gated_store() -> (Arc<GatedStore>, mpsc::Receiver<()>, mpsc::Sender<()>) {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let store = Arc::new(GatedStore {
        inner: MemoryStore::new(),
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    });
    (store, entered_rx, release_tx)
}

pub struct GatedStore {
    inner: MemoryStore,
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl GatedStore {
    fn wait_for_release(&self) {
        let _ = self.entered.lock().expect("gate lock").send(());
        let _ = self.release.lock().expect("gate lock").recv();
    }
}

impl DocumentStore for GatedStore {
    fn get_all_ordered(
        &self,
        collection: &str,
        order_field: &str,
        direction: Direction,
    ) -> Result<Vec<Document>, StoreError> {
        self.wait_for_release();
        self.inner.get_all_ordered(collection, order_field, direction)
    }

    fn get_filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.get_filtered(collection, field, value)
    }

    fn put(&self, collection: &str, key: i64, document: &Document) -> Result<(), StoreError> {
        self.inner.put(collection, key, document)
    }

    fn update_field(
        &self,
        collection: &str,
        key: i64,
        field: &str,
        value: &Value,
    ) -> Result<(), StoreError> {
        self.inner.update_field(collection, key, field, value)
    }
}

/// Store double that lets a limited number of detail writes through and
/// then fails, to exercise the two-phase partial-failure mode.
pub struct FlakyDetailStore {
    inner: MemoryStore,
    detail_writes_allowed: AtomicUsize,
}

impl FlakyDetailStore {
    pub fn new(detail_writes_allowed: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            detail_writes_allowed: AtomicUsize::new(detail_writes_allowed),
        }
    }
}

impl DocumentStore for FlakyDetailStore {
    fn get_all_ordered(
        &self,
        collection: &str,
        order_field: &str,
        direction: Direction,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.get_all_ordered(collection, order_field, direction)
    }

    fn get_filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.get_filtered(collection, field, value)
    }

    fn put(&self, collection: &str, key: i64, document: &Document) -> Result<(), StoreError> {
        if collection == DETAILS {
            let remaining = self.detail_writes_allowed.load(Ordering::SeqCst);
            if remaining == 0 {
                return Err(StoreError::unavailable("simulated detail write failure"));
            }
            self.detail_writes_allowed.store(remaining - 1, Ordering::SeqCst);
        }
        self.inner.put(collection, key, document)
    }

    fn update_field(
        &self,
        collection: &str,
        key: i64,
        field: &str,
        value: &Value,
    ) -> Result<(), StoreError> {
        self.inner.update_field(collection, key, field, value)
    }
}
