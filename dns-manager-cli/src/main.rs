//! `dns-manager` command line entry point.
//!
//! ```bash
//! dns-manager accounts create --name Main --email ops@example.com --api-key "$CF_KEY"
//! dns-manager sync import-zones <account-id>
//! dns-manager sync pull <domain-id>
//! dns-manager --actor alice records toggle-proxy <domain-id> <record-id>
//! ```

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use dns_manager_app::{AppConfig, AppState};
use dns_manager_core::error::CoreError;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<String> {
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.log.level)?;

    let state = AppState::open(&config).await?;
    tracing::debug!(actor = %cli.actor, "Running command");

    let output = commands::run(&state, &cli.actor, cli.command)
        .await
        .inspect_err(|e| match e.downcast_ref::<CoreError>() {
            Some(core) if core.is_expected() => tracing::warn!("{core}"),
            _ => tracing::error!("{e:#}"),
        })?;
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Prints the error to stderr, as tagged JSON for service errors.
fn report(error: &anyhow::Error) {
    match error.downcast_ref::<CoreError>() {
        Some(core) => {
            let body = serde_json::to_string_pretty(core).unwrap_or_else(|_| core.to_string());
            eprintln!("{body}");
        }
        None => eprintln!("Error: {error:#}"),
    }
}
