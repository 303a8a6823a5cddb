//! sagemath-mcp - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use sagemath_mcp::{
    cli::{Args, Commands, Config},
    doctor::Doctor,
    logging,
    server::{self, SageMathServer},
    tools::{catalog, ToolRuntime},
};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Both must work even when the existing config file is broken
    match args.command() {
        Commands::Config { init: true, force } => return init_config(&args, force),
        Commands::Check => return run_check(&args).await,
        _ => {}
    }

    let config = Config::resolve(args.config.clone(), args.sage_cmd.clone())?;

    logging::init(args.verbosity().log_level(&config.logging.level))?;
    tracing::info!("Starting sagemath-mcp with command: {}", config.engine.command);

    let runner = Arc::new(config.runner());
    let runtime = ToolRuntime::new(runner.clone());

    match args.command() {
        Commands::Serve => {
            server::serve_stdio(runtime).await?;
        }
        Commands::Catalog { scope } => {
            println!("{}", catalog(&scope));
        }
        Commands::Tools => {
            list_tools(runtime);
        }
        Commands::Call { tool, args: raw } => {
            let arguments: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("Tool arguments are not valid JSON: {}", raw))?;
            println!("{}", runtime.execute(&tool, arguments).await);
        }
        Commands::Config { .. } => {
            show_config(&args, &config)?;
        }
        // Dispatched above, before the config is resolved
        Commands::Check => {}
    }

    Ok(())
}

/// Health check; a config that fails to load or validate is reported as a
/// failed check while the engine is still probed with the defaults
async fn run_check(args: &Args) -> Result<()> {
    let loaded = Config::resolve(args.config.clone(), args.sage_cmd.clone());

    let engine_config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => {
            let mut fallback = Config::default();
            fallback.apply_overrides(args.sage_cmd.clone());
            fallback
        }
    };

    logging::init(args.verbosity().log_level(&engine_config.logging.level))?;
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "configuration rejected, checking engine with defaults");
    }

    let doctor = Doctor::new(loaded, args.config.clone(), Arc::new(engine_config.runner()));
    let checks = doctor.run_diagnostics().await;
    Doctor::display_results(&checks);
    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn config_path(args: &Args) -> Result<PathBuf> {
    args.config
        .clone()
        .or_else(Config::default_path)
        .context("Cannot determine config path; pass --config")
}

fn init_config(args: &Args, force: bool) -> Result<()> {
    let path = config_path(args)?;
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    Config::default().save(&path)?;
    println!("{} Wrote default configuration to {}", "✓".green(), path.display());
    Ok(())
}

fn list_tools(runtime: ToolRuntime) {
    let server = SageMathServer::new(runtime);

    for tool in server.tools() {
        let name: &str = &tool.name;
        println!("{}", name.bold());
        if let Some(description) = &tool.description {
            println!("  {}", description);
        }

        let properties = tool
            .input_schema
            .get("properties")
            .and_then(|p| p.as_object());
        if let Some(properties) = properties {
            let params: Vec<&str> = properties.keys().map(String::as_str).collect();
            println!("  params: {}", params.join(", ").dimmed());
        }
        println!();
    }
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let source = match config_path(args) {
        Ok(path) if path.exists() => path.display().to_string(),
        _ => "built-in defaults".to_string(),
    };

    println!("{}", "sagemath-mcp configuration".bold());
    println!("  Source:     {}", source);
    println!("  Verbosity:  {:?}", args.verbosity());
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
