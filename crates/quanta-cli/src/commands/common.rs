//! Shared helpers for CLI commands.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use quanta_circuit::{Denominator, SimulationResult};
use quanta_client::{Config, QuantaClient};

/// Most outcomes listed before the rest are summarised.
const MAX_ROWS: usize = 16;

/// Connection flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub timeout: Option<u64>,
}

/// Load configuration; command-line flags override file and environment.
pub fn load_config(args: &ConnectionArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    if let Some(url) = &args.api_url {
        config.client.base_url = url.clone();
    }
    if let Some(secs) = args.timeout {
        config.client.timeout_seconds = secs;
    }
    config.validate()?;

    debug!(base_url = %config.client.base_url, "configuration loaded");
    Ok(config)
}

/// Create a client from the connection flags.
pub fn create_client(args: &ConnectionArgs) -> Result<(QuantaClient, Config)> {
    let config = load_config(args)?;
    let client = QuantaClient::new(&config.client)?;
    Ok((client, config))
}

/// Spinner shown while waiting on the service.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print measurement results in a table format.
pub fn print_results(result: &SimulationResult, denominator: Denominator) {
    let shots = match denominator {
        Denominator::Observed => result.total(),
        Denominator::Shots(n) => n,
    };
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        shots
    );

    let rows = result.rows(denominator);
    for row in rows.iter().take(MAX_ROWS) {
        let bar_len = (row.percent / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(&row.bitstring).cyan(),
            row.count,
            row.percent,
            style(bar).green()
        );
    }

    if rows.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", rows.len() - MAX_ROWS);
    }
}
