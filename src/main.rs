use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

mod config;

use config::Config;
use livescore_results::{BuildIdCache, GameProvider, LiveScore};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the records.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let cache = match config.seeded_build_id() {
        Some(build_id) => {
            info!("Using build id {} from configuration", build_id);
            BuildIdCache::seeded(build_id)
        }
        None => BuildIdCache::new(),
    };

    let provider: Arc<dyn GameProvider> = Arc::new(
        LiveScore::new(&config.client_options(), cache).context("Failed to create client")?,
    );

    let team = config.team();
    info!(
        "Fetching games for {} ({}) from {}",
        team.slug,
        team.id,
        provider.name()
    );

    let games = provider
        .fetch_team_games(&team, config.game_limit())
        .await
        .with_context(|| format!("Failed to fetch games for {}", team.slug))?;

    if games.is_empty() {
        warn!("No games found for {}", team.slug);
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for game in &games {
        writeln!(out, "{}", serde_json::to_string(game)?)?;
    }

    info!("Printed {} game(s) for {}", games.len(), team.slug);
    Ok(())
}
