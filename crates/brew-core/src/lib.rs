//! Core domain logic for brew.
//!
//! This crate contains:
//! - Entries: timed activities tagged with topics
//! - The log: the entry store and its accumulated topic set
//! - Queries: topic and interval filtering, aggregation, formatting
//! - View state and the countdown timer used by the terminal front end

pub mod entry;
mod error;
pub mod interval;
pub mod log;
pub mod query;
pub mod timer;
pub mod view;

pub use entry::{DurationComponent, Entry};
pub use error::{LogError, QueryError};
pub use interval::{Interval, WeekStart};
pub use log::{EntryOrder, Log, SCHEMA_VERSION};
pub use query::{
    component_seconds, describe_selection, entries_in_interval, entries_in_interval_from,
    entries_matching, entries_with_topics, format_duration, total_seconds,
};
pub use timer::{BrewTimer, EXTEND_SECONDS, TimerHandle};
pub use view::{Selection, ViewState};
