//! Parameter structures for tracker operations.
//!
//! Shared, framework-free parameter types used across interfaces. CLI
//! argument structs (with clap derives) convert into these so the core
//! never depends on interface frameworks.

use jiff::Timestamp;

use crate::models::{Intervention, InterventionDetail};

/// Parameters for creating an intervention.
#[derive(Debug, Clone)]
pub struct CreateIntervention {
    pub id: i64,
    pub date_intervention: Timestamp,
    pub description: Option<String>,
    pub intervenant_id: i64,
    pub intervenant_name: Option<String>,
    pub details: Vec<DetailCreate>,
}

/// One operation detail attached at intervention creation.
#[derive(Debug, Clone)]
pub struct DetailCreate {
    pub id: i64,
    pub operation_id: i64,
    pub operation_name: String,
    pub note: i32,
}

impl CreateIntervention {
    /// Materializes the pending intervention described by these
    /// parameters.
    pub fn into_intervention(self) -> Intervention {
        let mut intervention = Intervention::pending(self.id, self.date_intervention);
        intervention.description = self.description;
        intervention.intervenant_id = self.intervenant_id;
        intervention.intervenant_name = self.intervenant_name.unwrap_or_default();
        intervention.details = self
            .details
            .into_iter()
            .map(|d| InterventionDetail {
                id: d.id,
                intervention_id: self.id,
                operation_id: d.operation_id,
                operation_name: d.operation_name,
                note: d.note,
            })
            .collect();
        intervention
    }
}
