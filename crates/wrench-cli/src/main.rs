//! Wrench CLI application.
//!
//! Command-line interface for the wrench maintenance-operations
//! tracker.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use wrench_core::RepositoryBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let repository = RepositoryBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize repository")?;

    let cli = Cli::new(repository, TerminalRenderer::new(!no_color));

    info!("Wrench started");

    match command {
        Some(Commands::List) | None => cli.list().await,
        Some(Commands::Show { id }) => cli.show(id).await,
        Some(Commands::Add(add_args)) => cli.add(add_args).await,
        Some(Commands::SetStatus { id, status }) => cli.set_status(id, status.into()).await,
        Some(Commands::Import { file }) => cli.import(&file).await,
        Some(Commands::Seed) => cli.seed().await,
        Some(Commands::Calendar { year, month }) => cli.calendar(year, month).await,
    }
}
