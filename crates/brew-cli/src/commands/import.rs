//! Import command for merging a JSON log into the database.
//!
//! Accepts files written by `brew export` as well as older saves that use a
//! single `lengthSeconds` per entry.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use brew_core::Log;
use clap::Args;

use crate::Config;
use crate::commands::util::open_database;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file to read.
    pub path: PathBuf,

    /// Replace the stored log instead of appending to it.
    #[arg(long)]
    pub replace: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &ImportArgs, config: &Config) -> Result<()> {
    let content = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let imported: Log = if content.trim().is_empty() {
        Log::new()
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", args.path.display()))?
    };

    let count = imported.len();
    let mut db = open_database(config)?;
    let log = if args.replace {
        imported
    } else {
        let mut log = db.load_log()?;
        log.add_topics(imported.all_topics().iter().cloned());
        for entry in imported.entries() {
            log.add_entry(entry.clone());
        }
        log
    };
    db.save_log(&log)?;

    writeln!(
        writer,
        "Imported {count} entries from {}",
        args.path.display()
    )?;
    Ok(())
}
