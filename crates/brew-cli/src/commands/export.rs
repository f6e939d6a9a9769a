//! Export command for writing the whole log as JSON.

use std::io::Write;

use anyhow::{Context, Result};

use crate::Config;
use crate::commands::util::open_database;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let log = db.load_log()?;

    serde_json::to_writer_pretty(&mut *writer, &log).context("failed to serialize log")?;
    writeln!(writer)?;
    tracing::debug!(entries = log.len(), "exported log");
    Ok(())
}
