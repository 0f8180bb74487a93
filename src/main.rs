mod config;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use config::{CliConfig, Config};
use sales_aggregator::{analyze, AnalyzeOptions};
use std::{fs, io};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = CliConfig::parse();

    run_report(&config)?;

    info!("Report completed successfully");

    Ok(())
}

fn run_report<C: Config>(config: &C) -> Result<()> {
    let path = config.input_path();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;

    info!("Loaded {} bytes from {}", text.len(), path.display());

    let options = AnalyzeOptions {
        numeric_policy: config.numeric_policy(),
    };
    let report = analyze(&text, &options).context("Failed to aggregate sales data")?;

    info!(
        "Total sales {} across {} months",
        report.overall_total,
        report.monthly_sales.len()
    );

    let stdout = io::stdout();
    let handle = stdout.lock();

    report::write_report(&report, config.output_format(), handle)
}
