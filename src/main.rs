use anyhow::Result;
use clap::Parser;
use tracing::info;

use gridiron_trends::ingest;
use gridiron_trends::reports;

mod config;

use config::{Config, Report};

fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let mut games = ingest::load_games(&config.data)?;
    if config.season_from.is_some() || config.season_to.is_some() {
        let from = config.season_from.unwrap_or(i32::MIN);
        let to = config.season_to.unwrap_or(i32::MAX);
        games.retain(|g| g.season >= from && g.season <= to);
    }
    info!(
        games = games.len(),
        data = %config.data,
        "loaded game records"
    );

    let json = render(&config, &games)?;
    println!("{}", json);
    Ok(())
}

fn render(config: &Config, games: &[gridiron_trends::GameRecord]) -> Result<String> {
    macro_rules! out {
        ($value:expr) => {
            if config.pretty {
                Ok(serde_json::to_string_pretty(&$value)?)
            } else {
                Ok(serde_json::to_string(&$value)?)
            }
        };
    }

    match config.report {
        Report::Comebacks => out!(reports::comebacks::compute_comebacks(games)),
        Report::Streaks => out!(reports::streaks::compute_streaks(games)),
        Report::PowerRankings => out!(reports::power_rankings::compute_power_rankings(games)),
        Report::Parity => out!(reports::parity::compute_parity(games)),
        Report::Luck => out!(reports::luck::compute_luck(games)),
        Report::HomeField => out!(reports::home_field::compute_home_field(games)),
        Report::Weather => out!(reports::weather::compute_weather(games)),
        Report::Primetime => out!(reports::primetime::compute_primetime(games)),
        Report::Margins => out!(reports::margins::compute_margins(games)),
        Report::Betting => out!(reports::betting::compute_betting(games)),
        Report::Momentum => out!(reports::momentum::compute_momentum(games)),
        Report::Rivalries => out!(reports::rivalry::compute_rivalries(games)),
    }
}
