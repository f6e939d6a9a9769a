//! CLI subcommand implementations.

pub mod add;
pub mod brew;
pub mod export;
pub mod import;
pub mod list;
pub mod remove;
pub mod status;
pub mod topics;
pub mod util;
