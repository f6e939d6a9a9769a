//! Countdown for an activity in progress.
//!
//! The remaining time is shared between two parties: an input thread that
//! extends or ends the countdown through a [`TimerHandle`], and the render
//! loop that owns the [`BrewTimer`] and calls [`BrewTimer::tick`] as wall time
//! passes. Elapsed time is credited to the focused or unfocused counter
//! depending on the focus flag at each tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use crate::entry::Entry;

/// Seconds added by one [`TimerHandle::extend_default`].
pub const EXTEND_SECONDS: i64 = 10;

/// Producer side of a running timer. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    remaining: Arc<AtomicI64>,
    focused: Arc<AtomicBool>,
}

impl TimerHandle {
    /// Adds `seconds` to the countdown.
    pub fn extend(&self, seconds: i64) {
        self.remaining.fetch_add(seconds, Ordering::Relaxed);
    }

    pub fn extend_default(&self) {
        self.extend(EXTEND_SECONDS);
    }

    /// Ends the countdown early.
    pub fn finish(&self) {
        self.remaining.store(0, Ordering::Relaxed);
    }

    /// Flips between focused and unfocused time. Returns the new state.
    pub fn toggle_focus(&self) -> bool {
        !self.focused.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn remaining(&self) -> i64 {
        self.remaining.load(Ordering::Relaxed).max(0)
    }
}

/// Consumer side of a running timer.
#[derive(Debug)]
pub struct BrewTimer {
    handle: TimerHandle,
    focused_seconds: i64,
    unfocused_seconds: i64,
}

impl BrewTimer {
    /// Starts a countdown of `seconds`, counting focused time.
    pub fn new(seconds: i64) -> Self {
        Self {
            handle: TimerHandle {
                remaining: Arc::new(AtomicI64::new(seconds)),
                focused: Arc::new(AtomicBool::new(true)),
            },
            focused_seconds: 0,
            unfocused_seconds: 0,
        }
    }

    pub fn handle(&self) -> TimerHandle {
        self.handle.clone()
    }

    /// Records `elapsed` seconds of wall time.
    pub fn tick(&mut self, elapsed: i64) {
        if self.is_focused() {
            self.focused_seconds += elapsed;
        } else {
            self.unfocused_seconds += elapsed;
        }
        self.handle.remaining.fetch_sub(elapsed, Ordering::Relaxed);
    }

    pub fn remaining(&self) -> i64 {
        self.handle.remaining()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.remaining.load(Ordering::Relaxed) <= 0
    }

    pub fn is_focused(&self) -> bool {
        self.handle.focused.load(Ordering::Relaxed)
    }

    pub const fn elapsed(&self) -> i64 {
        self.focused_seconds + self.unfocused_seconds
    }

    /// Completes `entry` with the time recorded so far.
    pub fn into_entry(self, entry: Entry) -> Entry {
        entry.with_durations(self.focused_seconds, self.unfocused_seconds)
    }
}
