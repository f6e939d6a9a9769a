//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{add, brew, import, list, remove, topics};

/// Brew: time your work and see where it went.
///
/// Logs timed activities tagged with topics and summarises the time spent
/// per day, week, month or year.
#[derive(Debug, Parser)]
#[command(name = "brew", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a finished activity.
    Add(add::AddArgs),

    /// Show logged activities and the time spent on them.
    Log(list::LogArgs),

    /// Delete an activity by its index in `brew log --interval all`.
    Remove(remove::RemoveArgs),

    /// List, register or prune topics.
    Topics {
        #[command(subcommand)]
        action: Option<topics::TopicsAction>,
    },

    /// Show focused and unfocused minutes per interval.
    Status,

    /// Run a countdown for an activity and record it when done.
    Brew(brew::BrewArgs),

    /// Write the whole log as JSON to stdout.
    Export,

    /// Merge entries from a JSON log file.
    Import(import::ImportArgs),
}
