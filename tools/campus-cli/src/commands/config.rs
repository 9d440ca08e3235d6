//! Configuration management commands.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CampusConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let browse = &ctx.config.browse;
    ctx.output.info("");
    ctx.output.info("[browse]");
    ctx.output.kv("page_size", &browse.page_size.to_string());
    ctx.output.kv("pagination", browse.pagination.as_str());
    ctx.output.kv("debounce_ms", &browse.debounce_ms.to_string());
    ctx.output.kv("candidate_limit", &browse.candidate_limit.to_string());
    ctx.output.kv("price_ceiling", &browse.price_ceiling.to_string());
    ctx.output
        .kv("visible_page_delta", &browse.visible_page_delta.to_string());

    let store = &ctx.config.store;
    ctx.output.info("");
    ctx.output.info("[store]");
    if let Some(catalog) = &store.catalog {
        ctx.output.kv("catalog", &catalog.display().to_string());
    }
    ctx.output.kv("timeout_ms", &store.timeout_ms.to_string());
    ctx.output.kv("max_retries", &store.max_retries.to_string());

    if !browse.is_standard_page_size() {
        ctx.output.warn(&format!(
            "page_size {} is not one of the sizes the page selector offers",
            browse.page_size
        ));
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => find_config_file(&ctx.cwd)?,
    };

    let mut config = CampusConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.browse.validate()?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
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

    std::fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `campus config init` to create one.");
    };

    ctx.config.browse.validate()?;
    if let Some(catalog) = &ctx.config.store.catalog {
        let resolved = ctx.catalog_path(None)?;
        if !resolved.exists() {
            bail!("Catalog not found: {}", catalog.display());
        }
    }

    ctx.output
        .success(&format!("{} is valid", path.display()));
    Ok(())
}

fn get_config_value(config: &CampusConfig, key: &str) -> Result<serde_json::Value> {
    let parts: Vec<&str> = key.split('.').collect();
    let browse = &config.browse;
    let store = &config.store;

    let value = match parts.as_slice() {
        ["browse", "page_size"] => json!(browse.page_size),
        ["browse", "pagination"] => json!(browse.pagination.as_str()),
        ["browse", "debounce_ms"] => json!(browse.debounce_ms),
        ["browse", "candidate_limit"] => json!(browse.candidate_limit),
        ["browse", "price_ceiling"] => json!(browse.price_ceiling),
        ["browse", "visible_page_delta"] => json!(browse.visible_page_delta),
        ["store", "catalog"] => json!(store.catalog),
        ["store", "timeout_ms"] => json!(store.timeout_ms),
        ["store", "max_retries"] => json!(store.max_retries),
        _ => bail!("Unknown config key: {}", key),
    };
    Ok(value)
}

fn set_config_value(config: &mut CampusConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let browse = &mut config.browse;
    let store = &mut config.store;

    match parts.as_slice() {
        ["browse", "page_size"] => browse.page_size = value.parse()?,
        ["browse", "pagination"] => browse.pagination = value.parse()?,
        ["browse", "debounce_ms"] => browse.debounce_ms = value.parse()?,
        ["browse", "candidate_limit"] => browse.candidate_limit = value.parse()?,
        ["browse", "price_ceiling"] => browse.price_ceiling = value.parse()?,
        ["browse", "visible_page_delta"] => browse.visible_page_delta = value.parse()?,
        ["store", "catalog"] => store.catalog = Some(PathBuf::from(value)),
        ["store", "timeout_ms"] => store.timeout_ms = value.parse()?,
        ["store", "max_retries"] => store.max_retries = value.parse()?,
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn find_config_file(cwd: &Path) -> Result<PathBuf> {
    for name in CONFIG_NAMES {
        let path = cwd.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    bail!("No config file found. Run `campus config init` to create one.")
}
