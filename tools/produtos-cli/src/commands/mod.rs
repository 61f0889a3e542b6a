//! CLI command implementations.

pub mod config;
pub mod invoke;

use clap::{Args, Subcommand};

/// Arguments for the invoke command.
#[derive(Args)]
pub struct InvokeArgs {
    /// HTTP method.
    #[arg(short, long, default_value = "GET", conflicts_with = "event")]
    pub method: String,

    /// Request path.
    #[arg(short, long, default_value = "/produtos", conflicts_with = "event")]
    pub path: String,

    /// Request body (JSON text).
    #[arg(short, long, conflicts_with_all = ["body_file", "event"])]
    pub body: Option<String>,

    /// Read the request body from a file.
    #[arg(long, conflicts_with = "event")]
    pub body_file: Option<String>,

    /// API Gateway event file (REST or HTTP shape).
    #[arg(short, long)]
    pub event: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (default).
    Show,
    /// Write a config file with default values.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
