//! Bulk import and sample seeding.
//!
//! Imports are best-effort: each record is written independently with
//! the same two-phase semantics as a direct add, and one failed record
//! never aborts the remaining records.

use jiff::{civil, tz::TimeZone};
use log::{error, info, warn};
use serde::Deserialize;

use super::InterventionRepository;
use crate::error::{Result, TrackerError};
use crate::models::Intervention;

/// Embedded seed data used to populate empty environments.
const SAMPLE_INTERVENTIONS: &str = include_str!("../../assets/sample_interventions.json");

/// Tally of a best-effort bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Number of records found in the payload
    pub attempted: usize,
    /// Number of records fully written
    pub written: usize,
}

impl ImportOutcome {
    /// True when every record in the payload landed.
    pub fn is_complete(&self) -> bool {
        self.attempted == self.written
    }
}

/// One record of the JSON import format.
#[derive(Debug, Deserialize)]
struct ImportRecord {
    id: i64,
    description_intervention: String,
    /// Calendar date, `YYYY-MM-DD`
    date_intervention: String,
}

impl ImportRecord {
    /// Seeded interventions start `Pending` with technician id 0, a
    /// blank name, and all three date fields equal to the parsed date.
    /// The date is pinned to UTC midnight so the same payload imports
    /// identically in every environment; viewer-local grouping happens
    /// at read time in the calendar aggregator.
    fn into_intervention(self) -> Result<Intervention> {
        let date: civil::Date = self
            .date_intervention
            .parse()
            .map_err(|e: jiff::Error| {
                TrackerError::invalid_input("date_intervention", e.to_string())
            })?;
        let timestamp = date
            .to_zoned(TimeZone::UTC)
            .map_err(|e| TrackerError::invalid_input("date_intervention", e.to_string()))?
            .timestamp();

        let mut intervention = Intervention::pending(self.id, timestamp);
        intervention.description = Some(self.description_intervention);
        Ok(intervention)
    }
}

impl InterventionRepository {
    /// Imports interventions from a JSON array of
    /// `{id, description_intervention, date_intervention}` records.
    ///
    /// A payload that is not a valid record array counts as zero
    /// attempts. Individual records that fail to parse or to write are
    /// logged and skipped.
    pub async fn import_interventions_from_json(&self, payload: &str) -> ImportOutcome {
        let records: Vec<ImportRecord> = match serde_json::from_str(payload) {
            Ok(records) => records,
            Err(e) => {
                error!("Import payload is not a valid record array: {e}");
                return ImportOutcome {
                    attempted: 0,
                    written: 0,
                };
            }
        };

        let mut outcome = ImportOutcome {
            attempted: records.len(),
            written: 0,
        };
        for record in records {
            let id = record.id;
            let intervention = match record.into_intervention() {
                Ok(intervention) => intervention,
                Err(e) => {
                    warn!("Skipping import record {id}: {e}");
                    continue;
                }
            };
            if self.add_intervention(&intervention).await.is_complete() {
                outcome.written += 1;
            }
        }

        info!(
            "Imported {}/{} interventions",
            outcome.written, outcome.attempted
        );
        outcome
    }

    /// Seeds the store with the embedded sample interventions.
    pub async fn add_sample_interventions(&self) -> ImportOutcome {
        self.import_interventions_from_json(SAMPLE_INTERVENTIONS)
            .await
    }
}
