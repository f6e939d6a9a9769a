//! The entry store: every logged activity plus the topics ever used.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize, Serializer};

use crate::entry::{DurationComponent, Entry, TopicRecord};
use crate::error::LogError;
use crate::interval::{Interval, WeekStart};
use crate::query;
use crate::view::Selection;

/// Current version of the serialized log.
pub const SCHEMA_VERSION: u32 = 2;

/// Order in which entries are listed and addressed by index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EntryOrder {
    /// Most recent `start_time` first. The order used for display.
    #[default]
    NewestFirst,
    /// Oldest `start_time` first.
    OldestFirst,
    /// The order entries were added in.
    Insertion,
}

/// All logged entries and the accumulated topic set.
///
/// The topic set only grows on its own: deleting the last entry that used a
/// topic leaves the topic in place until [`Log::prune_topics`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "LogRecord")]
pub struct Log {
    entries: Vec<Entry>,
    topics: BTreeSet<String>,
}

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and records its topics.
    pub fn add_entry(&mut self, entry: Entry) {
        tracing::debug!(name = %entry.name, topics = ?entry.topics, "adding entry");
        self.topics.extend(entry.topics.iter().cloned());
        self.entries.push(entry);
    }

    /// Removes the entry at `index` in the given order and returns it.
    pub fn remove_entry(&mut self, index: usize, order: EntryOrder) -> Result<Entry, LogError> {
        let positions = self.positions(order);
        let position = *positions.get(index).ok_or_else(|| LogError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        let removed = self.entries.remove(position);
        tracing::debug!(index, ?order, name = %removed.name, "removed entry");
        Ok(removed)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries listed in `order`. Entries with equal start times keep their
    /// insertion order.
    pub fn entries_in(&self, order: EntryOrder) -> Vec<&Entry> {
        self.positions(order)
            .into_iter()
            .map(|i| &self.entries[i])
            .collect()
    }

    /// Entries newest first. Recomputed on every call.
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        self.entries_in(EntryOrder::NewestFirst)
    }

    pub const fn all_topics(&self) -> &BTreeSet<String> {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers topics that no entry uses yet.
    ///
    /// Returns the names that were already known, in the order given.
    pub fn add_topics<I, S>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut duplicates = Vec::new();
        for name in names {
            let name = name.into();
            if self.topics.contains(&name) {
                duplicates.push(name);
            } else {
                self.topics.insert(name);
            }
        }
        duplicates
    }

    /// Keeps only the names that are known topics, preserving their order.
    pub fn known_topics<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| self.topics.contains(*name))
            .map(ToString::to_string)
            .collect()
    }

    /// Drops topics that no entry references and returns them.
    pub fn prune_topics(&mut self) -> Vec<String> {
        let used: BTreeSet<&String> = self.entries.iter().flat_map(|e| &e.topics).collect();
        let (kept, pruned): (BTreeSet<String>, BTreeSet<String>) = std::mem::take(&mut self.topics)
            .into_iter()
            .partition(|topic| used.contains(topic));
        self.topics = kept;
        if !pruned.is_empty() {
            tracing::debug!(?pruned, "pruned unused topics");
        }
        pruned.into_iter().collect()
    }

    /// Entries matching `selection`, newest first.
    pub fn select<Tz: TimeZone>(
        &self,
        selection: &Selection,
        now: &DateTime<Tz>,
        week_start: WeekStart,
    ) -> Vec<&Entry> {
        query::entries_matching(&self.entries, selection, now, week_start)
    }

    /// Whole minutes of `component` time across entries in `interval`.
    pub fn minutes_for_interval<Tz: TimeZone>(
        &self,
        interval: Interval,
        component: DurationComponent,
        now: &DateTime<Tz>,
        week_start: WeekStart,
    ) -> i64 {
        let entries = query::entries_in_interval_from(&self.entries, interval, now, week_start);
        query::component_seconds(entries, component) / 60
    }

    fn positions(&self, order: EntryOrder) -> Vec<usize> {
        let mut positions: Vec<usize> = (0..self.entries.len()).collect();
        match order {
            EntryOrder::NewestFirst => positions
                .sort_by(|&a, &b| self.entries[b].start_time.cmp(&self.entries[a].start_time)),
            EntryOrder::OldestFirst => positions.sort_by_key(|&i| self.entries[i].start_time),
            EntryOrder::Insertion => {}
        }
        positions
    }
}

impl Serialize for Log {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        LogDocument {
            version: SCHEMA_VERSION,
            topics: &self.topics,
            entries: &self.entries,
        }
        .serialize(serializer)
    }
}

#[derive(Serialize)]
struct LogDocument<'a> {
    version: u32,
    topics: &'a BTreeSet<String>,
    entries: &'a [Entry],
}

/// Serialized log of any version. Files without a version predate it.
#[derive(Deserialize)]
struct LogRecord {
    #[serde(default = "legacy_version")]
    version: u32,
    #[serde(default, alias = "Topics")]
    topics: Vec<TopicRecord>,
    #[serde(default, alias = "Entries")]
    entries: Vec<Entry>,
}

const fn legacy_version() -> u32 {
    1
}

impl From<LogRecord> for Log {
    fn from(record: LogRecord) -> Self {
        if record.version > SCHEMA_VERSION {
            tracing::warn!(
                version = record.version,
                supported = SCHEMA_VERSION,
                "log was written by a newer version"
            );
        }
        let mut log = Self {
            entries: Vec::with_capacity(record.entries.len()),
            topics: record.topics.into_iter().map(String::from).collect(),
        };
        for entry in record.entries {
            log.add_entry(entry);
        }
        log
    }
}
