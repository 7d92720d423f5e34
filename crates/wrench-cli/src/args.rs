//! Command-line argument definitions using clap.
//!
//! Argument structs here carry the clap derives and convert into
//! framework-free core parameter types, so the core stays independent
//! of the CLI framework.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use wrench_core::{DetailCreate, InterventionStatus};

/// Wrench, a maintenance-operations tracker.
///
/// Records machine service events (interventions), their lifecycle
/// status and per-operation notes, and presents them as a history list
/// or grouped by calendar date.
#[derive(Parser)]
#[command(version, about, name = "wrench")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/wrench/interventions.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Wrench CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Show the intervention history (default command)
    #[command(alias = "ls")]
    List,
    /// Show one intervention with its operation details
    Show { id: i64 },
    /// Record a new intervention
    Add(AddArgs),
    /// Change the status of an intervention
    SetStatus { id: i64, status: StatusArg },
    /// Import interventions from a JSON file
    Import { file: PathBuf },
    /// Populate the store with the embedded sample interventions
    Seed,
    /// Show the month calendar with per-day intervention counts
    #[command(alias = "cal")]
    Calendar { year: i16, month: i8 },
}

/// Record a new intervention
#[derive(clap::Args)]
pub struct AddArgs {
    /// Identifier for the intervention (also its store key)
    pub id: i64,
    /// Intervention date, YYYY-MM-DD
    pub date: String,
    /// Free-text description of the intervention
    #[arg(short, long)]
    pub description: Option<String>,
    /// Identifier of the responsible technician
    #[arg(long, default_value_t = 0)]
    pub technician_id: i64,
    /// Display name of the responsible technician
    #[arg(long)]
    pub technician_name: Option<String>,
    /// Operation detail as `<id>:<op_id>:<op_name>:<note>`; repeatable
    #[arg(long = "detail", value_parser = parse_detail)]
    pub details: Vec<DetailSpec>,
}

/// One `--detail` argument, parsed from `<id>:<op_id>:<op_name>:<note>`.
#[derive(Debug, Clone)]
pub struct DetailSpec {
    pub id: i64,
    pub operation_id: i64,
    pub operation_name: String,
    pub note: i32,
}

impl From<DetailSpec> for DetailCreate {
    fn from(val: DetailSpec) -> Self {
        DetailCreate {
            id: val.id,
            operation_id: val.operation_id,
            operation_name: val.operation_name,
            note: val.note,
        }
    }
}

fn parse_detail(s: &str) -> Result<DetailSpec, String> {
    let parts: Vec<&str> = s.splitn(4, ':').collect();
    let &[id, operation_id, operation_name, note] = parts.as_slice() else {
        return Err("expected <id>:<op_id>:<op_name>:<note>".to_string());
    };
    Ok(DetailSpec {
        id: id.parse().map_err(|e| format!("invalid detail id: {e}"))?,
        operation_id: operation_id
            .parse()
            .map_err(|e| format!("invalid operation id: {e}"))?,
        operation_name: operation_name.to_string(),
        note: note.parse().map_err(|e| format!("invalid note: {e}"))?,
    })
}

/// Status values accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl From<StatusArg> for InterventionStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Pending => InterventionStatus::Pending,
            StatusArg::InProgress => InterventionStatus::InProgress,
            StatusArg::Completed => InterventionStatus::Completed,
            StatusArg::Cancelled => InterventionStatus::Cancelled,
        }
    }
}
