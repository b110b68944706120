//! Ingestion boundary: loads the normalized games file and prepares it for
//! the report engine.
//!
//! The engine itself never does I/O; everything here runs once up front.
//! Rows are franchise-normalized (relocated teams collapse to one name),
//! deduplicated by (season, date, home, away), and sorted chronologically so
//! downstream streak/momentum scans can rely on input order.

pub mod rate_limit;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::GameRecord;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read games file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse games file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("games file contained no usable rows")]
    Empty,
}

/// Franchise relocations/renames collapsed to one name, so a team's history
/// survives its moves. Mirrors the exporter's map.
const FRANCHISE_MAP: &[(&str, &str)] = &[
    ("Indianapolis Colts", "Colts"),
    ("Baltimore Colts", "Colts"),
    ("Las Vegas Raiders", "Raiders"),
    ("Oakland Raiders", "Raiders"),
    ("Los Angeles Raiders", "Raiders"),
    ("Los Angeles Chargers", "Chargers"),
    ("San Diego Chargers", "Chargers"),
    ("Los Angeles Rams", "Rams"),
    ("St. Louis Rams", "Rams"),
    ("Cleveland Rams", "Rams"),
    ("Tennessee Titans", "Titans"),
    ("Tennessee Oilers", "Titans"),
    ("Houston Oilers", "Titans"),
    ("Arizona Cardinals", "Cardinals"),
    ("Phoenix Cardinals", "Cardinals"),
    ("St. Louis Cardinals", "Cardinals"),
    ("Chicago Cardinals", "Cardinals"),
    ("Washington Commanders", "Washington"),
    ("Washington Football Team", "Washington"),
    ("Washington Redskins", "Washington"),
    ("New England Patriots", "Patriots"),
    ("Boston Patriots", "Patriots"),
    ("Houston Texans", "Texans"),
];

/// Map a full franchise name to its canonical short name; unknown names
/// pass through unchanged (already-short names included).
pub fn normalize_franchise(name: &str) -> &str {
    FRANCHISE_MAP
        .iter()
        .find(|(full, _)| *full == name)
        .map(|(_, short)| *short)
        .unwrap_or(name)
}

/// Load, normalize, deduplicate, and chronologically sort a games JSON file.
pub fn load_games(path: impl AsRef<Path>) -> Result<Vec<GameRecord>, IngestError> {
    let raw = fs::read_to_string(path)?;
    let games: Vec<GameRecord> = serde_json::from_str(&raw)?;
    let games = prepare(games);
    if games.is_empty() {
        return Err(IngestError::Empty);
    }
    Ok(games)
}

/// The pure half of `load_games`, usable on already-parsed rows.
pub fn prepare(games: Vec<GameRecord>) -> Vec<GameRecord> {
    let mut seen: HashSet<(i32, String, String, String)> = HashSet::new();
    let mut out: Vec<GameRecord> = Vec::with_capacity(games.len());
    let mut dropped = 0usize;

    for mut g in games {
        if g.home.is_empty() || g.away.is_empty() {
            dropped += 1;
            continue;
        }
        if g.home_score < 0 || g.away_score < 0 {
            warn!(
                season = g.season,
                week = %g.week,
                "dropping row with negative score"
            );
            dropped += 1;
            continue;
        }
        if !g.date.is_empty() && NaiveDate::parse_from_str(&g.date, "%Y-%m-%d").is_err() {
            warn!(season = g.season, date = %g.date, "dropping row with unparsable date");
            dropped += 1;
            continue;
        }
        g.home = normalize_franchise(&g.home).to_string();
        g.away = normalize_franchise(&g.away).to_string();

        let key = (g.season, g.date.clone(), g.home.clone(), g.away.clone());
        if seen.insert(key) {
            out.push(g);
        } else {
            dropped += 1;
        }
    }

    out.sort_by(|a, b| a.chrono_key().cmp(&b.chrono_key()));
    if dropped > 0 {
        debug!(dropped, kept = out.len(), "ingest cleanup finished");
    }
    out
}
