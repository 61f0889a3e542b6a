//! Configuration commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "defaults"),
    }

    let handler = &ctx.config.handler;
    ctx.output.plain("");
    ctx.output.plain("[handler]");
    ctx.output.kv("store_name", &handler.store_name);
    ctx.output.kv("collection", &handler.collection);
    ctx.output.kv("key_prefix", &handler.key_prefix);
    ctx.output.kv("log_level", &handler.log_level.to_string().to_lowercase());
    ctx.output.kv("log_format", &handler.log_format.to_string());

    ctx.output.plain("");
    ctx.output.plain("[local]");
    ctx.output.kv("data_file", &ctx.data_path.display().to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = CliConfig::default().to_toml()?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
