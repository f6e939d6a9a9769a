//! Logged activities.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Local, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Which part of an entry's elapsed time to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationComponent {
    Focused,
    Unfocused,
    /// Focused plus unfocused.
    Total,
}

/// One logged activity occurrence.
///
/// Durations are not validated: negative counters and empty names are the
/// caller's business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "EntryRecord")]
pub struct Entry {
    /// Free-text label.
    pub name: String,

    /// When the activity began.
    pub start_time: DateTime<Utc>,

    /// Topics in the order they were given. Duplicates are kept.
    pub topics: Vec<String>,

    /// Seconds spent focused.
    pub focused_seconds: i64,

    /// Seconds spent unfocused.
    pub unfocused_seconds: i64,
}

impl Entry {
    /// Creates an entry with no elapsed time yet.
    pub fn new(name: impl Into<String>, start_time: DateTime<Utc>, topics: Vec<String>) -> Self {
        Self {
            name: name.into(),
            start_time,
            topics,
            focused_seconds: 0,
            unfocused_seconds: 0,
        }
    }

    /// Sets both duration counters.
    #[must_use]
    pub fn with_durations(mut self, focused_seconds: i64, unfocused_seconds: i64) -> Self {
        self.focused_seconds = focused_seconds;
        self.unfocused_seconds = unfocused_seconds;
        self
    }

    pub const fn total_seconds(&self) -> i64 {
        self.focused_seconds.saturating_add(self.unfocused_seconds)
    }

    /// When the activity ended: start plus total elapsed time.
    ///
    /// Saturates at the representable range for absurdly long durations.
    pub fn end_time(&self) -> DateTime<Utc> {
        let total = self.total_seconds();
        TimeDelta::try_seconds(total)
            .and_then(|delta| self.start_time.checked_add_signed(delta))
            .unwrap_or(if total < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    pub const fn seconds(&self, component: DurationComponent) -> i64 {
        match component {
            DurationComponent::Focused => self.focused_seconds,
            DurationComponent::Unfocused => self.unfocused_seconds,
            DurationComponent::Total => self.total_seconds(),
        }
    }

    /// Returns true if any of this entry's topics is in `topics`.
    ///
    /// An empty `topics` set matches every entry, tagged or not.
    pub fn has_any_topic(&self, topics: &BTreeSet<String>) -> bool {
        topics.is_empty() || self.topics.iter().any(|t| topics.contains(t))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Brew Entry: {}; started at {} for {} seconds.",
            self.name,
            self.start_time.with_timezone(&Local).format("%H:%M"),
            self.total_seconds()
        )
    }
}

/// On-disk entry shape, covering every revision of the save format.
///
/// Older saves carry a single `lengthSeconds` and topics as `{ "name": .. }`
/// objects. A lone length is read as unfocused time.
#[derive(Deserialize)]
struct EntryRecord {
    name: String,
    #[serde(alias = "startTime")]
    start_time: DateTime<Utc>,
    #[serde(default)]
    topics: Vec<TopicRecord>,
    #[serde(default, alias = "focusedTimeSeconds", alias = "focusedSeconds")]
    focused_seconds: Option<i64>,
    #[serde(default, alias = "unfocusedTimeSeconds", alias = "unfocusedSeconds")]
    unfocused_seconds: Option<i64>,
    #[serde(default, alias = "lengthSeconds")]
    length_seconds: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum TopicRecord {
    Name(String),
    Named { name: String },
}

impl From<TopicRecord> for String {
    fn from(record: TopicRecord) -> Self {
        match record {
            TopicRecord::Name(name) | TopicRecord::Named { name } => name,
        }
    }
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        let (focused_seconds, unfocused_seconds) =
            match (record.focused_seconds, record.unfocused_seconds) {
                (None, None) => (0, record.length_seconds.unwrap_or(0)),
                (focused, unfocused) => (focused.unwrap_or(0), unfocused.unwrap_or(0)),
            };
        Self {
            name: record.name,
            start_time: record.start_time,
            topics: record.topics.into_iter().map(String::from).collect(),
            focused_seconds,
            unfocused_seconds,
        }
    }
}
