//! Intervention status enumeration and transition semantics.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Lifecycle status of an intervention.
///
/// The persisted labels (`"PENDING"`, `"IN_PROGRESS"`, `"COMPLETED"`,
/// `"CANCELLED"`) are a compatibility contract with existing stored
/// documents and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterventionStatus {
    /// Recorded but not yet started. Initial status of every
    /// intervention.
    #[default]
    Pending,

    /// Work on the machine is underway
    InProgress,

    /// All operations finished
    Completed,

    /// Abandoned without completion
    Cancelled,
}

impl InterventionStatus {
    /// Persisted string label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionStatus::Pending => "PENDING",
            InterventionStatus::InProgress => "IN_PROGRESS",
            InterventionStatus::Completed => "COMPLETED",
            InterventionStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parses a stored status label, recovering from unknown values.
    ///
    /// An unrecognized label is a data-quality problem, not a read
    /// failure: it is logged and the status falls back to
    /// [`InterventionStatus::Pending`]. This is the path every stored
    /// document goes through, so a single bad document never poisons a
    /// whole listing.
    pub fn parse_lossy(label: &str) -> Self {
        match label.parse::<InterventionStatus>() {
            Ok(status) => status,
            Err(_) => {
                warn!("Unknown intervention status label '{label}', defaulting to PENDING");
                InterventionStatus::Pending
            }
        }
    }

    /// Status with a consistent icon for display contexts.
    pub fn with_icon(&self) -> &'static str {
        match self {
            InterventionStatus::Pending => "○ Pending",
            InterventionStatus::InProgress => "➤ In Progress",
            InterventionStatus::Completed => "✓ Completed",
            InterventionStatus::Cancelled => "✗ Cancelled",
        }
    }
}

impl FromStr for InterventionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "PENDING" => Ok(InterventionStatus::Pending),
            "IN_PROGRESS" | "INPROGRESS" => Ok(InterventionStatus::InProgress),
            "COMPLETED" => Ok(InterventionStatus::Completed),
            "CANCELLED" => Ok(InterventionStatus::Cancelled),
            _ => Err(format!("Invalid intervention status: {s}")),
        }
    }
}

impl fmt::Display for InterventionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InterventionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InterventionStatus {
    /// Deserializes through the lossy path: stored documents with an
    /// unknown label read back as `Pending` rather than failing.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(InterventionStatus::parse_lossy(&label))
    }
}

/// Computes the status resulting from a requested transition.
///
/// Every status mutation in the tracker routes through this function.
/// The current policy accepts every transition, including moving away
/// from `Completed` or `Cancelled`; there is no workflow-order
/// evidence to justify restricting it. Centralizing the decision here
/// means an allowed-transition table can be introduced later without
/// touching any call site.
pub fn transition(
    _current: InterventionStatus,
    requested: InterventionStatus,
) -> InterventionStatus {
    requested
}
