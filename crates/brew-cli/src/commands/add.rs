//! Add command for recording a finished activity.

use std::io::Write;

use anyhow::Result;
use brew_core::{Entry, format_duration};
use chrono::{DateTime, Utc};
use clap::Args;

use crate::Config;
use crate::commands::util::{minutes_to_seconds, open_database, parse_datetime, split_topics};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Name of the activity.
    pub name: String,

    /// Topic to tag the activity with (repeatable, or space separated).
    #[arg(short, long = "topic")]
    pub topics: Vec<String>,

    /// Focused seconds.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, conflicts_with = "minutes")]
    pub focused: i64,

    /// Unfocused seconds.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub unfocused: i64,

    /// Focused minutes, instead of --focused.
    #[arg(short, long)]
    pub minutes: Option<i64>,

    /// When the activity started (RFC 3339 or e.g. "2 hours ago"). Defaults to now.
    #[arg(long)]
    pub start: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &AddArgs, config: &Config) -> Result<()> {
    run_at(writer, args, config, Utc::now())
}

pub fn run_at<W: Write>(
    writer: &mut W,
    args: &AddArgs,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<()> {
    let start_time = match &args.start {
        Some(start) => parse_datetime(start, now)?,
        None => now,
    };
    let focused = match args.minutes {
        Some(minutes) => minutes_to_seconds(minutes)?,
        None => args.focused,
    };
    let entry = Entry::new(args.name.clone(), start_time, split_topics(&args.topics))
        .with_durations(focused, args.unfocused);
    let total = entry.total_seconds();

    let mut db = open_database(config)?;
    let mut log = db.load_log()?;
    log.add_entry(entry);
    db.save_log(&log)?;

    writeln!(writer, "Added {} ({})", args.name, format_duration(total))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use brew_db::Database;
    use chrono::Duration;
    use insta::assert_snapshot;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-12T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn args(name: &str) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            topics: Vec::new(),
            focused: 0,
            unfocused: 0,
            minutes: None,
            start: None,
        }
    }

    #[test]
    fn add_records_entry_and_topics() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("brew.db"),
            ..Config::default()
        };
        let mut output = Vec::new();
        let args = AddArgs {
            topics: vec!["Math Study".to_string()],
            unfocused: 1800,
            start: Some("1 hour ago".to_string()),
            ..args("Math")
        };

        run_at(&mut output, &args, &config, now()).unwrap();

        let log = Database::open(&config.database_path)
            .unwrap()
            .load_log()
            .unwrap();
        assert_eq!(log.len(), 1);
        let entry = &log.entries()[0];
        assert_eq!(entry.topics, vec!["Math".to_string(), "Study".to_string()]);
        assert_eq!(entry.start_time, now() - Duration::hours(1));
        assert_eq!((entry.focused_seconds, entry.unfocused_seconds), (0, 1800));
        assert_eq!(log.all_topics().len(), 2);

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output.trim_end(), @"Added Math (30 minutes, 0 seconds)");
    }

    #[test]
    fn minutes_count_as_focused_time() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("nested/dir/brew.db"),
            ..Config::default()
        };
        let mut output = Vec::new();
        let args = AddArgs {
            minutes: Some(90),
            ..args("Deep work")
        };

        run_at(&mut output, &args, &config, now()).unwrap();

        let log = Database::open(&config.database_path)
            .unwrap()
            .load_log()
            .unwrap();
        assert_eq!(log.entries()[0].focused_seconds, 5400);
        assert_eq!(log.entries()[0].start_time, now());

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output.trim_end(), @"Added Deep work (1 hours, 30 minutes)");
    }

    #[test]
    fn add_rejects_bad_start() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("brew.db"),
            ..Config::default()
        };
        let mut output = Vec::new();
        let args = AddArgs {
            start: Some("whenever".to_string()),
            ..args("x")
        };

        let err = run_at(&mut output, &args, &config, now()).unwrap_err();
        assert!(err.to_string().contains("Invalid datetime"));
    }

    #[test]
    fn add_rejects_overflowing_minutes() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("brew.db"),
            ..Config::default()
        };
        let args = AddArgs {
            minutes: Some(i64::MAX),
            ..args("x")
        };

        let err = run_at(&mut Vec::new(), &args, &config, now()).unwrap_err();
        assert!(err.to_string().starts_with("Minutes value too large"));
    }
}
