use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use brew_cli::commands::{add, brew, export, import, list, remove, status, topics};
use brew_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();
    match command {
        Commands::Add(args) => add::run(&mut stdout, args, &config)?,
        Commands::Log(args) => list::run(&mut stdout, args, &config)?,
        Commands::Remove(args) => remove::run(&mut stdout, args, &config)?,
        Commands::Topics { action } => topics::run(&mut stdout, action.as_ref(), &config)?,
        Commands::Status => status::run(&mut stdout, &config)?,
        Commands::Brew(args) => brew::run(&mut stdout, args, &config)?,
        Commands::Export => export::run(&mut stdout, &config)?,
        Commands::Import(args) => import::run(&mut stdout, args, &config)?,
    }
    stdout.flush()?;

    Ok(())
}
