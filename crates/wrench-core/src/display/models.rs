//! Display implementations for the domain models.
//!
//! Interventions format as a markdown block with metadata lines;
//! details format as single list items so they compose into the
//! parent's block or a standalone list.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Intervention, InterventionDetail};

impl fmt::Display for Intervention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Intervention {}", self.id)?;
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Date: {}", LocalDateTime(&self.date_intervention))?;
        writeln!(f, "- Planned: {}", LocalDateTime(&self.date_prevue))?;
        writeln!(f, "- Completed: {}", LocalDateTime(&self.date_realisation))?;
        if self.intervenant_name.is_empty() {
            writeln!(f, "- Technician: #{}", self.intervenant_id)?;
        } else {
            writeln!(
                f,
                "- Technician: {} (#{})",
                self.intervenant_name, self.intervenant_id
            )?;
        }
        if let Some(planning_id) = self.planning_id {
            writeln!(f, "- Planning: #{planning_id}")?;
        }
        if let Some(constat_id) = self.constat_id {
            writeln!(f, "- Constat: #{constat_id}")?;
        }
        if let Some(ref description) = self.description {
            writeln!(f)?;
            writeln!(f, "{description}")?;
        }
        if !self.details.is_empty() {
            writeln!(f)?;
            writeln!(f, "**Operations:**")?;
            for detail in &self.details {
                write!(f, "{detail}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for InterventionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} (op #{}, note {})",
            self.operation_name, self.operation_id, self.note
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::models::{Intervention, InterventionDetail, InterventionStatus};

    fn sample_intervention() -> Intervention {
        let mut intervention = Intervention::pending(3, Timestamp::UNIX_EPOCH);
        intervention.intervenant_name = "R. Fontaine".to_string();
        intervention.intervenant_id = 12;
        intervention.status = InterventionStatus::InProgress;
        intervention.description = Some("Gearbox overhaul".to_string());
        intervention.details.push(InterventionDetail {
            id: 1,
            intervention_id: 3,
            operation_id: 40,
            operation_name: "Drain gearbox".to_string(),
            note: 4,
        });
        intervention
    }

    #[test]
    fn intervention_display_includes_metadata() {
        let output = format!("{}", sample_intervention());
        assert!(output.contains("## Intervention 3"));
        assert!(output.contains("➤ In Progress"));
        assert!(output.contains("R. Fontaine (#12)"));
        assert!(output.contains("Gearbox overhaul"));
        assert!(output.contains("Drain gearbox (op #40, note 4)"));
    }

    #[test]
    fn blank_technician_name_falls_back_to_id() {
        let mut intervention = sample_intervention();
        intervention.intervenant_name.clear();
        let output = format!("{intervention}");
        assert!(output.contains("- Technician: #12"));
    }
}
