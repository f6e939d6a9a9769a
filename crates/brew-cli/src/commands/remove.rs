//! Remove command for deleting a logged activity.

use std::io::Write;

use anyhow::Result;
use brew_core::{EntryOrder, format_duration};
use clap::Args;

use crate::Config;
use crate::commands::util::open_database;

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Index of the entry as shown by `brew log`.
    pub index: usize,
}

pub fn run<W: Write>(writer: &mut W, args: &RemoveArgs, config: &Config) -> Result<()> {
    let mut db = open_database(config)?;
    let mut log = db.load_log()?;

    let removed = log.remove_entry(args.index, EntryOrder::NewestFirst)?;
    db.save_log(&log)?;

    writeln!(
        writer,
        "Removed {} ({})",
        removed.name,
        format_duration(removed.total_seconds())
    )?;
    Ok(())
}
