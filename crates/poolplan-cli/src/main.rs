//! poolplan CLI application
//!
//! Command-line interface for scheduling recurring pool service visits.

mod args;
mod cli;
mod handlers;
mod offline;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use poolplan_core::{params::ListPlans, SchedulerBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    // Offline expansion never opens the database.
    let command = match command {
        Some(Expand(args)) => return offline::run(&args, &renderer),
        other => other,
    };

    let scheduler = SchedulerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize scheduler")?;

    info!("poolplan started");

    let cli = Cli::new(scheduler, renderer);
    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Override { command }) => cli.handle_override_command(command).await,
        Some(Pause(args)) => cli.pause_plan(&args.into()).await,
        Some(Resume(args)) => cli.resume_plan(&args.into()).await,
        Some(Schedule(args)) => cli.schedule(&args).await,
        Some(Invoice(args)) => cli.invoice(&args).await,
        Some(Expand(args)) => offline::run(&args, cli.renderer()),
        None => cli.list_plans(&ListPlans::default(), false).await,
    }
}
