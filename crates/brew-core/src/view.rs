//! View state owned by the display layer.
//!
//! The dashboard keeps which interval and topics are selected, and which row
//! of the filtered list is highlighted. None of it lives in the log; callers
//! hold a [`ViewState`] and pass its [`Selection`] into each query.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// Which entries a view shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub interval: Interval,
    /// Empty means every topic.
    #[serde(default)]
    pub topics: BTreeSet<String>,
}

impl Selection {
    pub const fn new(interval: Interval, topics: BTreeSet<String>) -> Self {
        Self { interval, topics }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }
}

/// Selection plus the highlighted row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub selection: Selection,
    /// Index into the filtered, newest-first list.
    pub selected: Option<usize>,
}

impl ViewState {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            selected: None,
        }
    }

    /// Moves to the next interval and clears the highlight.
    pub const fn cycle_interval(&mut self) {
        self.selection.interval = self.selection.interval.next();
        self.selected = None;
    }

    pub fn set_topics(&mut self, topics: BTreeSet<String>) {
        self.selection.topics = topics;
        self.selected = None;
    }

    /// Highlights the next row, wrapping to the top.
    pub const fn select_next(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            None => Some(0),
            Some(i) if i + 1 >= len => Some(0),
            Some(i) => Some(i + 1),
        };
    }

    /// Highlights the previous row, wrapping to the bottom.
    pub const fn select_previous(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            None | Some(0) => Some(len - 1),
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i - 1),
        };
    }

    /// Keeps the highlight inside a list that may have shrunk.
    pub const fn clamp(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            other => other,
        };
    }
}
