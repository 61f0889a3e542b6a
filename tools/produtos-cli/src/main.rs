//! Produtos CLI - run the product handler locally.
//!
//! Commands:
//! - `produtos invoke` - Send one request (flags or a gateway event file)
//! - `produtos config` - Show or create configuration

mod commands;
mod config;
mod context;
mod event;
mod output;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, InvokeArgs};

/// Produtos CLI - exercise the product API against a local table
#[derive(Parser)]
#[command(name = "produtos")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Table file (overrides `local.data_file`)
    #[arg(short, long, global = true)]
    data: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke the handler with one request
    Invoke(InvokeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), cli.data.as_deref(), output)?;

    let result = match cli.command {
        Commands::Invoke(args) => commands::invoke::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
