//! Topics command for listing and editing the known topic set.

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use crate::Config;
use crate::commands::util::{open_database, split_topics};

#[derive(Debug, Subcommand)]
pub enum TopicsAction {
    /// Register new topics (space separated or repeated).
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Forget topics that no entry uses any more.
    Prune,
}

pub fn run<W: Write>(writer: &mut W, action: Option<&TopicsAction>, config: &Config) -> Result<()> {
    let mut db = open_database(config)?;
    let mut log = db.load_log()?;

    match action {
        None => {
            if log.all_topics().is_empty() {
                writeln!(writer, "No topics yet.")?;
            }
            for topic in log.all_topics() {
                writeln!(writer, "{topic}")?;
            }
        }
        Some(TopicsAction::Add { names }) => {
            let names = split_topics(names);
            let mut added: Vec<&str> = Vec::new();
            for name in &names {
                if !log.all_topics().contains(name) && !added.contains(&name.as_str()) {
                    added.push(name);
                }
            }
            let duplicates = log.add_topics(names.iter().cloned());
            db.save_log(&log)?;

            if !added.is_empty() {
                writeln!(writer, "Added topics: {}", added.join(" "))?;
            }
            if !duplicates.is_empty() {
                writeln!(writer, "Duplicate topics: {}", duplicates.join(" "))?;
            }
        }
        Some(TopicsAction::Prune) => {
            let pruned = log.prune_topics();
            db.save_log(&log)?;
            if pruned.is_empty() {
                writeln!(writer, "No unused topics.")?;
            } else {
                writeln!(writer, "Pruned topics: {}", pruned.join(" "))?;
            }
        }
    }

    Ok(())
}
