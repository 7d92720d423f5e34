//! Intervention model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{InterventionDetail, InterventionStatus};

/// A machine service event with its lifecycle status and operation
/// details.
///
/// The three timestamps carry no ordering invariant relative to each
/// other: nothing requires planned <= actual <= completion, and callers
/// must not assume one (pending product clarification).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Intervention {
    /// Unique identifier, assigned by the caller and used as the store
    /// key
    pub id: i64,

    /// Identifier of the responsible technician
    pub intervenant_id: i64,

    /// Technician display name; may be blank
    pub intervenant_name: String,

    /// When the intervention actually took place
    pub date_intervention: Timestamp,

    /// When the intervention was planned
    pub date_prevue: Timestamp,

    /// When the intervention was completed
    pub date_realisation: Timestamp,

    /// Optional link to an external planning record
    #[serde(default)]
    pub planning_id: Option<i64>,

    /// Optional link to an external inspection (constat) record
    #[serde(default)]
    pub constat_id: Option<i64>,

    /// Lifecycle status
    #[serde(default)]
    pub status: InterventionStatus,

    /// Operation details, owned by this intervention.
    ///
    /// Read-side materialization only: details are persisted and
    /// queried as independent documents and joined back here by id.
    /// The field is never serialized into the intervention document.
    #[serde(default, skip_serializing)]
    pub details: Vec<InterventionDetail>,

    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
}

impl Intervention {
    /// Creates a pending intervention with all three date fields set to
    /// the same instant and no details.
    pub fn pending(id: i64, date: Timestamp) -> Self {
        Self {
            id,
            intervenant_id: 0,
            intervenant_name: String::new(),
            date_intervention: date,
            date_prevue: date,
            date_realisation: date,
            planning_id: None,
            constat_id: None,
            status: InterventionStatus::Pending,
            details: Vec::new(),
            description: None,
        }
    }
}
