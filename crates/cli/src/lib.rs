//! Asana CLI.
//!
//! This crate is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: defaults, `asana.toml`, `ASANA_*` environment
//!    variables, then command-line flags.
//! 2. **Wire observability**: `tracing-subscriber` with a JSON or pretty layer
//!    and an optional OpenTelemetry OTLP exporter.
//! 3. **Construct the client**: register it in a `ServiceCollection` and
//!    resolve it, exactly as a host application would.
//! 4. **Run the command** and print the response JSON to stdout.

use anyhow::{Context, Result};

pub mod cli;
pub mod commands;
pub mod config;
pub mod telemetry;

pub use cli::Cli;
pub use config::{AsanaConfig, ConfigError, ConfigLoader, LogFormat};

/// Runs one CLI invocation end to end.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let _telemetry = telemetry::init(config.log_format()?, config.otlp_endpoint.as_deref())?;
    tracing::debug!(?config, "Configuration loaded");

    let client = commands::build_client(&config)?;
    if let Some(output) = commands::execute(&client, cli.command).await? {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}
