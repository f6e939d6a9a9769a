//! Storage layer for brew.
//!
//! Persists a complete [`Log`] using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved to another thread but not shared without external
//! synchronization. The CLI opens one per invocation.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in RFC 3339 UTC form with as many fractional
//! digits as needed (e.g., `2024-01-15T10:30:00Z`, `2024-01-15T10:30:00.25Z`),
//! so a saved log loads back equal to the original.
//!
//! ## Entry Order
//!
//! `entries.id` is the entry's 1-based insertion position. Topics of an entry
//! keep their order (and duplicates) through `entry_topics.position`.

use std::collections::HashMap;
use std::path::Path;

use brew_core::{Entry, Log};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse an entry timestamp.
    #[error("invalid timestamp for entry {entry_id}: {timestamp}")]
    TimestampParse {
        entry_id: i64,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS topics (
                name TEXT PRIMARY KEY
            );

            -- id: 1-based insertion position
            -- start_time: RFC 3339 UTC
            CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                start_time TEXT NOT NULL,
                focused_seconds INTEGER NOT NULL DEFAULT 0,
                unfocused_seconds INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_entries_start ON entries(start_time);

            CREATE TABLE IF NOT EXISTS entry_topics (
                entry_id INTEGER NOT NULL,
                position INTEGER NOT NULL,
                topic TEXT NOT NULL,
                PRIMARY KEY (entry_id, position),
                FOREIGN KEY (entry_id) REFERENCES entries(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_entry_topics_topic ON entry_topics(topic);
            ",
        )?;
        Ok(())
    }

    /// Replaces the stored log with `log` in a single transaction.
    pub fn save_log(&mut self, log: &Log) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "
            DELETE FROM entry_topics;
            DELETE FROM entries;
            DELETE FROM topics;
            ",
        )?;
        {
            let mut topic_stmt = tx.prepare("INSERT INTO topics (name) VALUES (?)")?;
            for topic in log.all_topics() {
                topic_stmt.execute(params![topic])?;
            }

            let mut entry_stmt = tx.prepare(
                "
                INSERT INTO entries (id, name, start_time, focused_seconds, unfocused_seconds)
                VALUES (?, ?, ?, ?, ?)
                ",
            )?;
            let mut entry_topic_stmt = tx
                .prepare("INSERT INTO entry_topics (entry_id, position, topic) VALUES (?, ?, ?)")?;
            for (id, entry) in (1_i64..).zip(log.entries()) {
                entry_stmt.execute(params![
                    id,
                    entry.name,
                    format_timestamp(entry.start_time),
                    entry.focused_seconds,
                    entry.unfocused_seconds,
                ])?;
                for (position, topic) in (0_i64..).zip(&entry.topics) {
                    entry_topic_stmt.execute(params![id, position, topic])?;
                }
            }
        }
        tx.commit()?;
        tracing::debug!(
            entries = log.len(),
            topics = log.all_topics().len(),
            "saved log"
        );
        Ok(())
    }

    /// Loads the stored log. An empty database yields an empty log.
    pub fn load_log(&self) -> Result<Log, DbError> {
        let mut log = Log::new();

        let mut stmt = self.conn.prepare("SELECT name FROM topics ORDER BY name")?;
        let topics = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        log.add_topics(topics);

        let mut entry_topics = self.entry_topics()?;

        let mut stmt = self.conn.prepare(
            "
            SELECT id, name, start_time, focused_seconds, unfocused_seconds
            FROM entries
            ORDER BY id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                name: row.get(1)?,
                start_time: row.get(2)?,
                focused_seconds: row.get(3)?,
                unfocused_seconds: row.get(4)?,
            })
        })?;
        for row in rows {
            let row = row?;
            let start_time = parse_timestamp(&row.start_time, row.id)?;
            let topics = entry_topics.remove(&row.id).unwrap_or_default();
            log.add_entry(
                Entry::new(row.name, start_time, topics)
                    .with_durations(row.focused_seconds, row.unfocused_seconds),
            );
        }

        tracing::debug!(entries = log.len(), "loaded log");
        Ok(log)
    }

    /// Number of stored entries.
    pub fn entry_count(&self) -> Result<usize, DbError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn entry_topics(&self) -> Result<HashMap<i64, Vec<String>>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT entry_id, topic
            FROM entry_topics
            ORDER BY entry_id ASC, position ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        let mut topics: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            let (entry_id, topic) = row?;
            topics.entry(entry_id).or_default().push(topic);
        }
        Ok(topics)
    }
}

struct EntryRow {
    id: i64,
    name: String,
    start_time: String,
    focused_seconds: i64,
    unfocused_seconds: i64,
}

fn parse_timestamp(timestamp: &str, entry_id: i64) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            entry_id,
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
