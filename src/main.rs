use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::time::Duration;
use tracing::info;

mod analysis;
mod config;
mod error;
mod report;
mod robotevents;

use analysis::{build_rank_table, find_upsets, normalize_matches};
use config::{Cli, Config};
use robotevents::RobotEventsClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            println!("Invalid arguments.");
            std::process::exit(1);
        }
    };
    let config = Config::from_env(cli)?;
    config.validate()?;

    run(&config).await
}

async fn run(config: &Config) -> Result<()> {
    let client = RobotEventsClient::new(
        &config.base_url,
        config.token.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;

    let event_id = client
        .resolve_event_id(&config.sku)
        .await
        .with_context(|| format!("Failed to resolve event {}", config.sku))?;

    let match_records = client
        .fetch_matches(event_id, config.division)
        .await
        .context("Failed to fetch matches")?;
    let matches = normalize_matches(&match_records).context("Failed to read matches")?;

    let ranking_records = client
        .fetch_rankings(event_id, config.division)
        .await
        .context("Failed to fetch rankings")?;
    let rankings = build_rank_table(&ranking_records).context("Failed to read rankings")?;

    let upsets = find_upsets(&matches, &rankings).context("Failed to compute upsets")?;
    info!(
        "{} upset(s) out of {} qualification matches",
        upsets.len(),
        matches.len()
    );

    report::print_report(&upsets).context("Failed to write report")?;
    Ok(())
}
