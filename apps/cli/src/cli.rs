use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Check whether your web services are up or down
#[derive(Debug, Parser)]
#[command(name = "upcheck", version, about)]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/upcheck/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Endpoint list file (default: ~/.upcheck.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Per-endpoint timeout in milliseconds, overrides the config file
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a URL to monitor
    Add {
        url: String,
        /// A friendly name for this endpoint
        name: Option<String>,
    },
    /// Remove a URL from monitoring
    Remove { url: String },
    /// Show all saved endpoints
    List,
    /// Check if endpoints are up or down
    Status {
        /// Check only this URL (does not need to be saved)
        url: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config,
}
