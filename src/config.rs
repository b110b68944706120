use clap::{Parser, ValueEnum};

/// Which report to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    Comebacks,
    Streaks,
    PowerRankings,
    Parity,
    Luck,
    HomeField,
    Weather,
    Primetime,
    Margins,
    Betting,
    Momentum,
    Rivalries,
}

/// NFL historical-trends report generator
#[derive(Parser, Debug, Clone)]
#[command(name = "gridiron-trends", version, about)]
pub struct Config {
    /// Path to the normalized games JSON file
    #[arg(long, env = "GRIDIRON_DATA", default_value = "data/games.json")]
    pub data: String,

    /// Report to compute
    #[arg(long, value_enum)]
    pub report: Report,

    /// Only include seasons at or after this year
    #[arg(long, env = "SEASON_FROM")]
    pub season_from: Option<i32>,

    /// Only include seasons at or before this year
    #[arg(long, env = "SEASON_TO")]
    pub season_to: Option<i32>,

    /// Pretty-print the JSON output
    #[arg(long, default_value = "false")]
    pub pretty: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let (Some(from), Some(to)) = (self.season_from, self.season_to) {
            if from > to {
                anyhow::bail!("season range is inverted: {} > {}", from, to);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_season_range_is_rejected() {
        let cfg = Config {
            data: "games.json".into(),
            report: Report::Streaks,
            season_from: Some(2020),
            season_to: Some(2010),
            pretty: false,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn open_ended_ranges_are_fine() {
        let cfg = Config {
            data: "games.json".into(),
            report: Report::Parity,
            season_from: Some(2000),
            season_to: None,
            pretty: true,
        };
        assert!(cfg.validate().is_ok());
    }
}
