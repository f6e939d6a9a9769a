//! Status command for showing focused and unfocused minutes per interval.

use std::io::Write;

use anyhow::Result;
use brew_core::{DurationComponent, Interval};
use chrono::{DateTime, Local, TimeZone};

use crate::Config;
use crate::commands::util::open_database;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    run_at(writer, config, &Local::now())
}

pub fn run_at<W: Write, Tz: TimeZone>(
    writer: &mut W,
    config: &Config,
    now: &DateTime<Tz>,
) -> Result<()> {
    let db = open_database(config)?;
    let log = db.load_log()?;

    writeln!(writer, "Brew status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(
        writer,
        "Entries: {}, topics: {}",
        log.len(),
        log.all_topics().len()
    )?;

    if log.is_empty() {
        writeln!(writer, "No entries recorded.")?;
        return Ok(());
    }

    writeln!(writer)?;
    writeln!(writer, "{:<12}{:>9}{:>11}", "MINUTES", "FOCUSED", "UNFOCUSED")?;
    for interval in Interval::ALL {
        let focused =
            log.minutes_for_interval(interval, DurationComponent::Focused, now, config.week_start);
        let unfocused =
            log.minutes_for_interval(interval, DurationComponent::Unfocused, now, config.week_start);
        writeln!(
            writer,
            "{:<12}{focused:>9}{unfocused:>11}",
            interval.phrase(now)
        )?;
    }

    Ok(())
}
