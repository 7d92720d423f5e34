//! Command handlers bridging parsed arguments to the core.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, ensure, Context, Result};
use jiff::{civil, tz::TimeZone, Timestamp};
use wrench_core::{
    CalendarIndex, CreateIntervention, HistoryController, InterventionList, InterventionRepository,
    InterventionStatus, ListOutcome, MonthView,
};

use crate::args::AddArgs;
use crate::renderer::TerminalRenderer;

pub struct Cli {
    repository: Arc<InterventionRepository>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(repository: InterventionRepository, renderer: TerminalRenderer) -> Self {
        Self {
            repository: Arc::new(repository),
            renderer,
        }
    }

    /// History view: loads through the controller, so an empty store is
    /// seeded with samples on first use.
    pub async fn list(&self) -> Result<()> {
        let controller = HistoryController::new(Arc::clone(&self.repository));
        controller.initialize().await;
        let state = controller.state();

        let mut output = String::from("# Intervention History\n\n");
        if let Some(error) = state.error {
            output.push_str(&format!("**{error}**\n"));
        } else {
            output.push_str(&InterventionList(state.interventions).to_string());
        }
        self.renderer.render(&output)
    }

    /// One intervention with its details joined in.
    pub async fn show(&self, id: i64) -> Result<()> {
        let outcome = self.repository.list_interventions().await;
        if outcome.is_unavailable() {
            bail!("Intervention history is currently unavailable");
        }
        let Some(mut intervention) = outcome
            .into_interventions()
            .into_iter()
            .find(|i| i.id == id)
        else {
            bail!("Intervention {id} not found");
        };

        intervention.details = self.repository.get_details(id).await;
        self.renderer.render(&intervention.to_string())
    }

    pub async fn add(&self, args: AddArgs) -> Result<()> {
        let params = CreateIntervention {
            id: args.id,
            date_intervention: parse_date(&args.date)?,
            description: args.description,
            intervenant_id: args.technician_id,
            intervenant_name: args.technician_name,
            details: args.details.into_iter().map(Into::into).collect(),
        };

        let outcome = self
            .repository
            .add_intervention(&params.into_intervention())
            .await;
        self.renderer.render(&format!("{outcome}\n"))?;
        ensure!(outcome.is_complete(), "intervention write did not complete");
        Ok(())
    }

    /// Status changes go through the controller so they follow the same
    /// transition path as interactive use.
    pub async fn set_status(&self, id: i64, status: InterventionStatus) -> Result<()> {
        let controller = HistoryController::new(Arc::clone(&self.repository));
        controller.refresh().await;
        if !controller.update_status(id, status).await {
            bail!("Status update for intervention {id} failed");
        }
        self.renderer
            .render(&format!("Intervention {id} set to {}.\n", status.with_icon()))
    }

    pub async fn import(&self, file: &Path) -> Result<()> {
        let payload = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read import file {}", file.display()))?;
        let outcome = self.repository.import_interventions_from_json(&payload).await;
        self.renderer.render(&format!("{outcome}\n"))?;
        ensure!(outcome.is_complete(), "some records were not imported");
        Ok(())
    }

    pub async fn seed(&self) -> Result<()> {
        let outcome = self.repository.add_sample_interventions().await;
        self.renderer.render(&format!("{outcome}\n"))
    }

    /// Month calendar with per-day intervention counts, in the viewer's
    /// time zone.
    pub async fn calendar(&self, year: i16, month: i8) -> Result<()> {
        let interventions = match self.repository.list_interventions().await {
            ListOutcome::Unavailable => {
                bail!("Intervention history is currently unavailable")
            }
            outcome => outcome.into_interventions(),
        };

        let index = CalendarIndex::new(&interventions, &TimeZone::system());
        let view = MonthView::new(year, month, &index)?;
        self.renderer.render(&view.to_string())
    }
}

/// Parses a `YYYY-MM-DD` argument into a UTC-midnight timestamp,
/// matching the import format's date semantics.
fn parse_date(s: &str) -> Result<Timestamp> {
    let date: civil::Date = s
        .parse()
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))?;
    Ok(date.to_zoned(TimeZone::UTC)?.timestamp())
}
