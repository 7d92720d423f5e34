//! Builder for creating and configuring repository instances.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task;

use super::InterventionRepository;
use crate::error::{Result, TrackerError};
use crate::store::{DocumentStore, SqliteStore};

/// Builder for creating and configuring [`InterventionRepository`]
/// instances.
///
/// By default the repository is backed by a [`SqliteStore`] at the XDG
/// data path; tests and embedders can inject any
/// [`DocumentStore`] instead with [`with_store`](Self::with_store).
#[derive(Default)]
pub struct RepositoryBuilder {
    database_path: Option<PathBuf>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl RepositoryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/wrench/interventions.db` or
    /// `~/.local/share/wrench/interventions.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Injects a pre-built document store, bypassing SQLite setup.
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the configured repository instance.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileSystem` if the database directory
    /// cannot be created, `TrackerError::Store` if SQLite
    /// initialization fails.
    pub async fn build(self) -> Result<InterventionRepository> {
        if let Some(store) = self.store {
            return Ok(InterventionRepository::new(store));
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = task::spawn_blocking(move || SqliteStore::new(&db_path))
            .await
            .map_err(|e| TrackerError::Configuration {
                message: format!("Task join error: {e}"),
            })??;

        Ok(InterventionRepository::new(Arc::new(store)))
    }

    /// Returns the default database path following the XDG Base
    /// Directory specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("wrench")
            .place_data_file("interventions.db")
            .map_err(|e| TrackerError::XdgDirectory(e.to_string()))
    }
}
