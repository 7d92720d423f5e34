//! Intervention detail model definition.

use serde::{Deserialize, Serialize};

/// A single maintenance operation performed within an intervention.
///
/// Details are created alongside their parent intervention and are
/// immutable once written; they have no independent lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterventionDetail {
    /// Unique identifier within the detail collection, used as the
    /// store key
    pub id: i64,

    /// Back-reference to the owning intervention (non-owning, used for
    /// querying only)
    pub intervention_id: i64,

    /// Identifier of the maintenance operation performed
    pub operation_id: i64,

    /// Human-readable operation name
    pub operation_name: String,

    /// Rating/score recorded for the operation
    pub note: i32,
}
