#![warn(clippy::all, clippy::pedantic)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;

mod cli;
mod commands;
mod config;
mod display;
mod store;

use cli::{Cli, Command};
use config::Config;
use store::EndpointStore;

/// Exit status for errors that are not "something is down"
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", format!("  ✗  {error:#}").red());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::from_config(cli.config.as_ref()).context("Failed to load config")?;
    if let Some(timeout_ms) = cli.timeout_ms {
        config.probe.timeout_ms = timeout_ms;
    }
    if let Some(data_file) = cli.data_file {
        config.storage.data_file = Some(data_file);
    }

    match cli.command {
        Command::Config => {
            print!("{config}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Add { url, name } => commands::add(&mut open_store(&config)?, &url, name),
        Command::Remove { url } => commands::remove(&mut open_store(&config)?, &url),
        Command::List => commands::list(&open_store(&config)?),
        Command::Status { url, json } => {
            commands::status(&open_store(&config)?, &config.probe, url.as_deref(), json).await
        }
    }
}

fn open_store(config: &Config) -> Result<EndpointStore> {
    let data_file = config.data_file()?;
    let store = EndpointStore::open(&data_file).context("Failed to load endpoint list")?;
    tracing::debug!(path = %data_file.display(), count = store.endpoints().len(), "Loaded endpoints");

    Ok(store)
}
