//! Intervention repository: translation between the entity model and
//! the external document store.
//!
//! The repository owns the tracker's failure policy. No error type
//! ever crosses its public boundary: reads degrade to
//! [`ListOutcome::Unavailable`] or empty sequences, writes degrade to
//! outcome structs, and every degradation is logged. Callers therefore
//! only ever see data (possibly empty) plus an explicit result kind.
//!
//! # Two-phase writes
//!
//! [`add_intervention`](InterventionRepository::add_intervention)
//! writes the parent document first and then each detail as an
//! independent document. The abstracted store has no transaction
//! primitive, so this is a known partial-failure mode: a detail write
//! can fail after the parent landed, leaving the store with a parent
//! and a partial detail set. Nothing is rolled back. The returned
//! [`WriteOutcome`] describes exactly which phase succeeded so callers
//! can recover deterministically.

use std::sync::Arc;

use log::{error, warn};
use serde_json::json;
use tokio::task;

use crate::models::{Intervention, InterventionDetail, InterventionStatus};
use crate::store::{Direction, Document, DocumentStore};

pub mod builder;
pub mod import;

pub use builder::RepositoryBuilder;
pub use import::ImportOutcome;

/// Collection holding intervention documents, keyed by intervention id.
pub const INTERVENTIONS: &str = "interventions";
/// Collection holding detail documents, keyed by detail id.
pub const DETAILS: &str = "intervention_details";

const DATE_FIELD: &str = "date_intervention";
const STATUS_FIELD: &str = "status";
const PARENT_FIELD: &str = "intervention_id";

/// Result kind for list reads, distinguishing a store with no data
/// from a store that could not be reached.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    /// The store answered with at least one parseable intervention
    Loaded(Vec<Intervention>),
    /// The store answered and holds no (parseable) interventions
    Empty,
    /// The store could not be reached; nothing is known about its
    /// contents
    Unavailable,
}

impl ListOutcome {
    /// Collapses the outcome into a plain list, losing the
    /// empty-vs-unavailable distinction.
    pub fn into_interventions(self) -> Vec<Intervention> {
        match self {
            ListOutcome::Loaded(interventions) => interventions,
            ListOutcome::Empty | ListOutcome::Unavailable => Vec::new(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ListOutcome::Unavailable)
    }
}

/// Structured result of a two-phase intervention write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Whether the parent intervention document was written
    pub parent_written: bool,
    /// How many detail documents were written before the first failure
    pub details_written: usize,
    /// How many detail documents the intervention carried
    pub details_total: usize,
}

impl WriteOutcome {
    pub(crate) fn failed(details_total: usize) -> Self {
        Self {
            parent_written: false,
            details_written: 0,
            details_total,
        }
    }

    /// True when the parent and every detail landed.
    pub fn is_complete(&self) -> bool {
        self.parent_written && self.details_written == self.details_total
    }
}

/// CRUD surface over interventions and their details.
///
/// The backing store is injected at construction and shared behind an
/// `Arc`, so a single repository instance can be threaded through
/// controllers and CLI handlers explicitly; there is no process-wide
/// singleton.
pub struct InterventionRepository {
    store: Arc<dyn DocumentStore>,
}

impl InterventionRepository {
    /// Creates a repository over the given document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Lists all interventions, newest `date_intervention` first.
    ///
    /// Documents lacking parseable core fields are skipped with a
    /// warning; a store-level failure yields
    /// [`ListOutcome::Unavailable`]. The `details` of each returned
    /// intervention are left empty; join them per intervention with
    /// [`get_details`](Self::get_details).
    pub async fn list_interventions(&self) -> ListOutcome {
        let store = Arc::clone(&self.store);
        let result = task::spawn_blocking(move || {
            store.get_all_ordered(INTERVENTIONS, DATE_FIELD, Direction::Descending)
        })
        .await;

        let docs = match result {
            Ok(Ok(docs)) => docs,
            Ok(Err(e)) => {
                error!("Intervention listing unavailable: {e}");
                return ListOutcome::Unavailable;
            }
            Err(e) => {
                error!("Intervention listing task failed: {e}");
                return ListOutcome::Unavailable;
            }
        };

        let interventions: Vec<Intervention> =
            docs.into_iter().filter_map(parse_intervention).collect();
        if interventions.is_empty() {
            ListOutcome::Empty
        } else {
            ListOutcome::Loaded(interventions)
        }
    }

    /// Fetches the details belonging to an intervention.
    ///
    /// Malformed documents are skipped; a store failure is logged and
    /// yields an empty sequence. No guaranteed order.
    pub async fn get_details(&self, intervention_id: i64) -> Vec<InterventionDetail> {
        let store = Arc::clone(&self.store);
        let result = task::spawn_blocking(move || {
            store.get_filtered(DETAILS, PARENT_FIELD, &json!(intervention_id))
        })
        .await;

        match result {
            Ok(Ok(docs)) => docs.into_iter().filter_map(parse_detail).collect(),
            Ok(Err(e)) => {
                error!("Details for intervention {intervention_id} unavailable: {e}");
                Vec::new()
            }
            Err(e) => {
                error!("Detail fetch task failed: {e}");
                Vec::new()
            }
        }
    }

    /// Writes an intervention and its details (two-phase, non-atomic).
    ///
    /// The intervention document is keyed by its caller-supplied `id`;
    /// a colliding key silently overwrites the stored document
    /// (last-write-wins). Each detail is written under its own id with
    /// `intervention_id` forced to the parent's id, which keeps the
    /// composition invariant: a persisted detail always references an
    /// intervention that existed at write time. A detail failure stops
    /// the remaining detail writes; see the module docs for the
    /// partial-failure mode.
    pub async fn add_intervention(&self, intervention: &Intervention) -> WriteOutcome {
        let store = Arc::clone(&self.store);
        let intervention = intervention.clone();
        let details_total = intervention.details.len();

        let result = task::spawn_blocking(move || write_intervention(&*store, &intervention));
        match result.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Intervention write task failed: {e}");
                WriteOutcome::failed(details_total)
            }
        }
    }

    /// Sets the stored status of an intervention.
    ///
    /// Unconditional single-field update: no existence check, no
    /// transition validation beyond what
    /// [`transition`](crate::models::transition) already applied at the
    /// call site. Returns `false` only on store failure.
    pub async fn update_status(&self, id: i64, status: InterventionStatus) -> bool {
        let store = Arc::clone(&self.store);
        let result = task::spawn_blocking(move || {
            store.update_field(INTERVENTIONS, id, STATUS_FIELD, &json!(status.as_str()))
        })
        .await;

        match result {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                error!("Status update for intervention {id} failed: {e}");
                false
            }
            Err(e) => {
                error!("Status update task failed: {e}");
                false
            }
        }
    }
}

/// Synchronous two-phase write, run on the blocking pool.
fn write_intervention(store: &dyn DocumentStore, intervention: &Intervention) -> WriteOutcome {
    let details_total = intervention.details.len();

    let parent_doc = match serde_json::to_value(intervention) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Cannot serialize intervention {}: {e}", intervention.id);
            return WriteOutcome::failed(details_total);
        }
    };
    if let Err(e) = store.put(INTERVENTIONS, intervention.id, &parent_doc) {
        error!("Failed to write intervention {}: {e}", intervention.id);
        return WriteOutcome::failed(details_total);
    }

    let mut details_written = 0;
    for detail in &intervention.details {
        let mut detail = detail.clone();
        detail.intervention_id = intervention.id;
        let written = serde_json::to_value(&detail)
            .map_err(|e| e.to_string())
            .and_then(|doc| {
                store
                    .put(DETAILS, detail.id, &doc)
                    .map_err(|e| e.to_string())
            });
        match written {
            Ok(()) => details_written += 1,
            Err(e) => {
                error!(
                    "Partial write for intervention {}: detail {} failed: {e}",
                    intervention.id, detail.id
                );
                break;
            }
        }
    }

    WriteOutcome {
        parent_written: true,
        details_written,
        details_total,
    }
}

fn parse_intervention(doc: Document) -> Option<Intervention> {
    match serde_json::from_value(doc) {
        Ok(intervention) => Some(intervention),
        Err(e) => {
            warn!("Skipping malformed intervention document: {e}");
            None
        }
    }
}

fn parse_detail(doc: Document) -> Option<InterventionDetail> {
    match serde_json::from_value(doc) {
        Ok(detail) => Some(detail),
        Err(e) => {
            warn!("Skipping malformed detail document: {e}");
            None
        }
    }
}
