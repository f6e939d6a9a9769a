//! Brew command for timing an activity live.
//!
//! A countdown runs in the foreground while a background thread reads single
//! letter commands from stdin. The finished activity is recorded with the
//! focused and unfocused time actually spent.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Result, bail};
use brew_core::{BrewTimer, EXTEND_SECONDS, Entry, TimerHandle, format_duration};
use chrono::Utc;
use clap::Args;

use crate::Config;
use crate::commands::util::{minutes_to_seconds, open_database, split_topics};

#[derive(Debug, Args)]
pub struct BrewArgs {
    /// Name of the activity.
    pub name: String,

    /// Topic to tag the activity with (repeatable, or space separated).
    #[arg(short, long = "topic")]
    pub topics: Vec<String>,

    /// Countdown length in minutes. Defaults to `default_minutes` from config.
    #[arg(short, long)]
    pub minutes: Option<i64>,
}

pub fn run<W: Write>(writer: &mut W, args: &BrewArgs, config: &Config) -> Result<()> {
    let minutes = args.minutes.unwrap_or(config.default_minutes);
    if minutes <= 0 {
        bail!("countdown must be at least one minute, got {minutes}");
    }

    let timer = BrewTimer::new(minutes_to_seconds(minutes)?);
    spawn_key_listener(timer.handle());

    let entry = Entry::new(args.name.clone(), Utc::now(), split_topics(&args.topics));
    let entry = countdown(writer, timer, entry, || thread::sleep(Duration::from_secs(1)))?;
    record(writer, entry, config)
}

/// Runs `timer` to completion, calling `wait` between one-second ticks.
///
/// Returns `entry` completed with the recorded focused and unfocused time.
pub fn countdown<W: Write>(
    writer: &mut W,
    mut timer: BrewTimer,
    entry: Entry,
    mut wait: impl FnMut(),
) -> Result<Entry> {
    writeln!(writer, "Currently brewing: {}", entry.name)?;
    if !entry.topics.is_empty() {
        writeln!(writer, "Ingredients: {}", entry.topics.join(", "))?;
    }
    writeln!(
        writer,
        "Enter i to add {EXTEND_SECONDS} seconds, p to pause focus, s to stop."
    )?;

    while !timer.is_finished() {
        render(writer, &timer)?;
        wait();
        timer.tick(1);
    }
    writeln!(writer, "\r{:<32}", "Done!")?;

    Ok(timer.into_entry(entry))
}

fn render<W: Write>(writer: &mut W, timer: &BrewTimer) -> Result<()> {
    let remaining = timer.remaining();
    let state = if timer.is_focused() {
        "focused"
    } else {
        "unfocused"
    };
    write!(
        writer,
        "\r{:02}:{:02} left ({state})   ",
        remaining / 60,
        remaining % 60
    )?;
    writer.flush()?;
    Ok(())
}

fn record<W: Write>(writer: &mut W, entry: Entry, config: &Config) -> Result<()> {
    let mut db = open_database(config)?;
    let mut log = db.load_log()?;
    writeln!(
        writer,
        "Brewed {} for {}",
        entry.name,
        format_duration(entry.total_seconds())
    )?;
    log.add_entry(entry);
    db.save_log(&log)?;
    Ok(())
}

/// Applies one line of keyboard input to the running timer.
fn apply_key(handle: &TimerHandle, line: &str) {
    match line.trim() {
        "i" => {
            handle.extend_default();
            tracing::debug!(remaining = handle.remaining(), "extended countdown");
        }
        "s" => {
            handle.finish();
            tracing::debug!("stopped countdown");
        }
        "p" => {
            let focused = handle.toggle_focus();
            tracing::debug!(focused, "toggled focus");
        }
        other => tracing::debug!(input = other, "ignored input"),
    }
}

fn spawn_key_listener(handle: TimerHandle) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            apply_key(&handle, &line);
        }
    });
}
