use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ExpandArgs, OverrideCommands, PausePlanArgs, PlanCommands, ResumePlanArgs, ScheduleArgs,
};

/// Scheduling for recurring pool service plans
///
/// poolplan stores service plans (weekly, every two weeks, monthly, or twice
/// per week or month), per-date window overrides and pauses, and expands
/// them into concrete visit dates and invoice batches for any date range.
#[derive(Parser)]
#[command(version, about, name = "pp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/poolplan/poolplan.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the poolplan CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage service plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage per-date window overrides
    #[command(alias = "o")]
    Override {
        #[command(subcommand)]
        command: OverrideCommands,
    },
    /// Pause a plan from a date, until a date or indefinitely
    Pause(PausePlanArgs),
    /// Lift a plan's pause
    Resume(ResumePlanArgs),
    /// List a stored plan's visits within a date range
    #[command(alias = "s")]
    Schedule(ScheduleArgs),
    /// Group a stored plan's visits into invoice batches
    Invoice(ScheduleArgs),
    /// Expand a plan described in a JSON file without touching the database
    Expand(ExpandArgs),
}
