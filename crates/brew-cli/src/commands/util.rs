//! Shared utilities for CLI commands.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use brew_db::Database;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::Config;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Parse a datetime string as either RFC 3339 or relative time.
///
/// Supports:
/// - RFC 3339: "2026-01-15T10:30:00Z"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime(s: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s.trim()) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use RFC 3339 (e.g., 2026-01-15T10:30:00Z) or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    Ok(now - Duration::minutes(n * minutes_per_unit))
}

/// Converts a `--minutes` argument to seconds, rejecting values that overflow.
pub fn minutes_to_seconds(minutes: i64) -> Result<i64> {
    let Some(seconds) = minutes.checked_mul(60) else {
        anyhow::bail!("Minutes value too large: {minutes}");
    };
    Ok(seconds)
}

/// Collects topic arguments into a set, splitting on whitespace and commas.
///
/// `--topic "Math Study"` and `--topic Math --topic Study` are equivalent.
pub fn topic_set(args: &[String]) -> BTreeSet<String> {
    split_topics(args).into_iter().collect()
}

/// Like [`topic_set`] but keeps order and duplicates.
pub fn split_topics(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(|c: char| c.is_whitespace() || c == ','))
        .filter(|topic| !topic.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Opens the configured database, creating its directory if needed.
pub fn open_database(config: &Config) -> Result<Database> {
    let parent = config
        .database_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    open_at(&config.database_path)
}

fn open_at(path: &Path) -> Result<Database> {
    Database::open(path).with_context(|| format!("failed to open {}", path.display()))
}
