//! Log command: the summary sentence and the matching entries.
//!
//! Indices printed here are positions in the newest-first view of the whole
//! log, so they stay valid for `brew remove` whatever filter is active.

use std::fmt;
use std::io::Write;

use anyhow::Result;
use brew_core::{Entry, Interval, Selection, describe_selection, format_duration, total_seconds};
use chrono::{DateTime, Local, TimeZone};
use clap::Args;

use crate::Config;
use crate::commands::util::{open_database, topic_set};

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Interval to show: day, week, month, year or all.
    #[arg(short, long, default_value = "all")]
    pub interval: Interval,

    /// Only show entries with any of these topics (repeatable, or space separated).
    #[arg(short, long = "topic")]
    pub topics: Vec<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &LogArgs, config: &Config) -> Result<()> {
    run_at(writer, args, config, &Local::now())
}

pub fn run_at<W, Tz>(writer: &mut W, args: &LogArgs, config: &Config, now: &DateTime<Tz>) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let db = open_database(config)?;
    let log = db.load_log()?;

    let selection = Selection::new(args.interval, topic_set(&args.topics));
    let matching = log.select(&selection, now, config.week_start);
    let total = total_seconds(matching.iter().copied());

    writeln!(
        writer,
        "{}",
        describe_selection(&selection.topics, selection.interval, total, now)
    )?;

    if matching.is_empty() {
        writeln!(writer, "No entries recorded.")?;
        return Ok(());
    }

    writeln!(writer)?;
    // Both lists are newest first, so matching entries appear in `sorted` in
    // the same relative order.
    let mut matching = matching.into_iter().peekable();
    for (index, entry) in log.sorted_entries().into_iter().enumerate() {
        if matching.next_if(|m| std::ptr::eq(*m, entry)).is_some() {
            writeln!(writer, "{}", format_row(index, entry, &now.timezone()))?;
        }
    }

    Ok(())
}

fn format_row<Tz>(index: usize, entry: &Entry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let start = entry.start_time.with_timezone(tz).format("%Y-%m-%d %H:%M");
    let duration = format_duration(entry.total_seconds());
    let topics: String = entry.topics.iter().map(|t| format!(" [{t}]")).collect();
    format!("{index:>3}  {start}  {duration:<22}  {}{topics}", entry.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    use brew_core::Log;
    use brew_db::Database;
    use chrono::{Duration, FixedOffset, Utc};
    use insta::assert_snapshot;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-03-12T15:00:00+01:00").unwrap()
    }

    fn entry(name: &str, hours_ago: i64, topics: &[&str], focused: i64, unfocused: i64) -> Entry {
        Entry::new(
            name,
            now().with_timezone(&Utc) - Duration::hours(hours_ago),
            topics.iter().map(ToString::to_string).collect(),
        )
        .with_durations(focused, unfocused)
    }

    fn seeded_config(temp: &tempfile::TempDir) -> Config {
        let config = Config {
            database_path: temp.path().join("brew.db"),
            ..Config::default()
        };
        let mut log = Log::new();
        log.add_entry(entry("Math", 2, &["Math", "Study"], 0, 1800));
        log.add_entry(entry("Essay", 1, &["Writing"], 3000, 725));
        log.add_entry(entry("Last month", 24 * 40, &["Study"], 60, 0));
        log.add_entry(entry("Walk", 5, &[], 0, 45));
        Database::open(&config.database_path)
            .unwrap()
            .save_log(&log)
            .unwrap();
        config
    }

    fn output_for(config: &Config, interval: Interval, topics: &[&str]) -> String {
        let args = LogArgs {
            interval,
            topics: topics.iter().map(ToString::to_string).collect(),
        };
        let mut output = Vec::new();
        run_at(&mut output, &args, config, &now()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn log_shows_everything_newest_first() {
        let temp = tempfile::tempdir().unwrap();
        let config = seeded_config(&temp);

        let output = output_for(&config, Interval::All, &[]);
        assert_snapshot!(output.trim_end(), @r"
        You have spent 1 hours, 33 minutes working in total

          0  2025-03-12 14:00  1 hours, 2 minutes      Essay [Writing]
          1  2025-03-12 13:00  30 minutes, 0 seconds   Math [Math] [Study]
          2  2025-03-12 10:00  45 seconds              Walk
          3  2025-01-31 15:00  1 minutes, 0 seconds    Last month [Study]
        ");
    }

    #[test]
    fn log_filters_by_topic_and_interval_but_keeps_indices() {
        let temp = tempfile::tempdir().unwrap();
        let config = seeded_config(&temp);

        let output = output_for(&config, Interval::Month, &["Study"]);
        assert_snapshot!(output.trim_end(), @r"
        You have spent 30 minutes, 0 seconds working on: Study in March

          1  2025-03-12 13:00  30 minutes, 0 seconds   Math [Math] [Study]
        ");
    }

    #[test]
    fn log_reports_empty_selection() {
        let temp = tempfile::tempdir().unwrap();
        let config = seeded_config(&temp);

        let output = output_for(&config, Interval::Day, &["Nothing"]);
        assert_snapshot!(output.trim_end(), @r"
        You have spent 0 seconds working on: Nothing today
        No entries recorded.
        ");
    }

    #[test]
    fn log_survives_oversized_durations() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("brew.db"),
            ..Config::default()
        };
        let mut log = Log::new();
        log.add_entry(entry("Forever", 1, &[], 0, 9_000_000_000_000_000));
        log.add_entry(entry("Overflow", 2, &[], i64::MAX, 1));
        Database::open(&config.database_path)
            .unwrap()
            .save_log(&log)
            .unwrap();

        let output = output_for(&config, Interval::All, &[]);
        assert!(output.contains("  0  2025-03-12 14:00  "));
        assert!(output.contains("Forever"));
        assert!(output.contains("Overflow"));

        let output = output_for(&config, Interval::Day, &[]);
        assert_snapshot!(output.trim_end(), @r"
        You have spent 0 seconds working today
        No entries recorded.
        ");
    }
}
