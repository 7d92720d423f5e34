//! Observable view-state for the intervention history list.
//!
//! [`HistoryController`] owns the "current list + loading + error"
//! state consumed by presentation code. The state lives in a
//! `tokio::sync::watch` channel: the controller is the single writer,
//! any number of observers subscribe to the receiver side. All
//! mutation goes through one internal async mutex, so there is never
//! more than one owning sequence touching the observable.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use log::info;
use tokio::sync::{watch, Mutex};

use crate::models::{transition, Intervention, InterventionStatus};
use crate::repository::{InterventionRepository, ListOutcome};

/// Message surfaced when the backing store could not be reached.
const UNAVAILABLE_MESSAGE: &str = "Intervention history is currently unavailable";

/// Snapshot of the history view state.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    /// Current intervention list, newest first
    pub interventions: Vec<Intervention>,
    /// A load is in flight
    pub loading: bool,
    /// User-visible message for store-level failures
    pub error: Option<String>,
}

/// Loads, refreshes, and mutates the intervention history.
pub struct HistoryController {
    repository: Arc<InterventionRepository>,
    state: watch::Sender<HistoryState>,
    /// Bumped by [`cancel`](Self::cancel); a load finishing under a
    /// stale generation discards its result.
    generation: AtomicU64,
    /// Auto-seed runs at most once per controller instance.
    seeded: AtomicBool,
    load_lock: Mutex<()>,
}

impl HistoryController {
    /// Creates a controller over the given repository.
    pub fn new(repository: Arc<InterventionRepository>) -> Self {
        let (state, _) = watch::channel(HistoryState::default());
        Self {
            repository,
            state,
            generation: AtomicU64::new(0),
            seeded: AtomicBool::new(false),
            load_lock: Mutex::new(()),
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<HistoryState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    pub fn state(&self) -> HistoryState {
        self.state.borrow().clone()
    }

    /// First load. When the store answers "empty" (not "unreachable"),
    /// seeds the embedded samples once and reloads.
    ///
    /// The auto-seed is a convenience for empty environments, not a
    /// retry policy: it never fires on an unavailable store, and never
    /// more than once per controller.
    pub async fn initialize(&self) {
        // Seeding is decided from the load's own outcome: a cancelled
        // or unavailable load never reported the store empty.
        let outcome = self.load().await;

        let store_is_empty = matches!(outcome, Some(ListOutcome::Empty));
        if store_is_empty && !self.seeded.swap(true, Ordering::SeqCst) {
            info!("History is empty, seeding sample interventions");
            let outcome = self.repository.add_sample_interventions().await;
            info!("Seeded {}/{} sample interventions", outcome.written, outcome.attempted);
            self.load().await;
        }
    }

    /// Forces a full reload from the store.
    pub async fn refresh(&self) {
        self.load().await;
    }

    /// Writes a status change and reflects it by reloading the list.
    ///
    /// The requested status is routed through
    /// [`transition`](crate::models::transition). The reload is issued
    /// strictly after the store acknowledged the write, so the
    /// refreshed list always observes it; there is no optimistic local
    /// update. Returns whether the write succeeded.
    pub async fn update_status(&self, id: i64, requested: InterventionStatus) -> bool {
        let current = {
            let state = self.state.borrow();
            state
                .interventions
                .iter()
                .find(|i| i.id == id)
                .map(|i| i.status)
                .unwrap_or_default()
        };
        let next = transition(current, requested);

        let written = self.repository.update_status(id, next).await;
        self.load().await;
        written
    }

    /// Cancels any in-flight load: its eventual result will be
    /// discarded without touching observable state.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|state| state.loading = false);
    }

    /// Returns the applied outcome, or `None` when the load was
    /// cancelled and its result discarded.
    async fn load(&self) -> Option<ListOutcome> {
        let _guard = self.load_lock.lock().await;
        let generation = self.generation.load(Ordering::SeqCst);
        self.state.send_modify(|state| state.loading = true);

        let outcome = self.repository.list_interventions().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            // Cancelled while the fetch was in flight.
            return None;
        }

        self.state.send_modify(|state| {
            state.loading = false;
            match &outcome {
                ListOutcome::Loaded(interventions) => {
                    state.interventions = interventions.clone();
                    state.error = None;
                }
                ListOutcome::Empty => {
                    state.interventions = Vec::new();
                    state.error = None;
                }
                ListOutcome::Unavailable => {
                    state.interventions = Vec::new();
                    state.error = Some(UNAVAILABLE_MESSAGE.to_string());
                }
            }
        });
        Some(outcome)
    }
}
