//! Core library for the Wrench maintenance-operations tracker.
//!
//! This crate records machine service events ("interventions"), their
//! lifecycle status, and per-operation detail notes, and groups them by
//! calendar date. It provides:
//!
//! - the entity model and status state machine ([`models`])
//! - the document-store boundary with SQLite and in-memory backends
//!   ([`store`])
//! - the repository translating between the two, with its
//!   degrade-don't-throw failure policy ([`repository`])
//! - the calendar aggregation engine ([`calendar`])
//! - the observable history view-state controller ([`controller`])
//! - markdown display wrappers ([`display`])
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use wrench_core::{HistoryController, RepositoryBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = RepositoryBuilder::new()
//!     .with_database_path(Some("interventions.db"))
//!     .build()
//!     .await?;
//!
//! let controller = HistoryController::new(Arc::new(repository));
//! controller.initialize().await;
//!
//! for intervention in &controller.state().interventions {
//!     println!("{intervention}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod controller;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod repository;
pub mod store;

// Re-export commonly used types
pub use calendar::{month_grid, CalendarIndex};
pub use controller::{HistoryController, HistoryState};
pub use display::{DetailList, InterventionList, LocalDateTime, MonthView};
pub use error::{Result, TrackerError};
pub use models::{transition, Intervention, InterventionDetail, InterventionStatus};
pub use params::{CreateIntervention, DetailCreate};
pub use repository::{
    ImportOutcome, InterventionRepository, ListOutcome, RepositoryBuilder, WriteOutcome,
};
pub use store::{Direction, Document, DocumentStore, MemoryStore, SqliteStore, StoreError};
