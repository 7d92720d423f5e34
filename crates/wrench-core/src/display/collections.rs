//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Intervention, InterventionDetail};

/// Newtype wrapper for displaying an intervention listing.
///
/// Renders one compact line per intervention; empty collections are
/// handled gracefully.
pub struct InterventionList(pub Vec<Intervention>);

impl InterventionList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for InterventionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No interventions found.");
        }
        for intervention in &self.0 {
            let summary = intervention
                .description
                .as_deref()
                .unwrap_or("(no description)");
            writeln!(
                f,
                "- **#{}** {} ({}) {}",
                intervention.id,
                LocalDateTime(&intervention.date_intervention),
                intervention.status.with_icon(),
                summary
            )?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a detail listing.
pub struct DetailList(pub Vec<InterventionDetail>);

impl fmt::Display for DetailList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No operation details recorded.");
        }
        for detail in &self.0 {
            write!(f, "{detail}")?;
        }
        Ok(())
    }
}
