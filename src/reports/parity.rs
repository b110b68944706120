//! Season parity: how evenly wins were spread across the league.
//!
//! Per season this reports Shannon entropy of the win distribution, the
//! normalized parity index, and the Gini coefficient, plus the most and
//! least balanced seasons over the whole input.

use serde::Serialize;

use crate::engine::format::fixed3;
use crate::engine::group::fold_by_team_season;
use crate::engine::measures::{gini, parity_index, shannon_entropy};
use crate::model::GameRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonParity {
    pub season: i32,
    pub teams: u32,
    pub total_wins: u32,
    pub entropy: String,
    pub max_entropy: String,
    /// Normalized entropy in [0, 1]; 1.000 only for exactly even wins.
    pub parity_index: String,
    pub gini: String,
    pub top_team: String,
    pub top_team_wins: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRef {
    pub season: i32,
    pub parity_index: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityResult {
    /// Ascending by season.
    pub seasons: Vec<SeasonParity>,
    pub most_balanced: Option<SeasonRef>,
    pub most_lopsided: Option<SeasonRef>,
}

pub fn compute_parity(games: &[GameRecord]) -> ParityResult {
    let totals = fold_by_team_season(games);

    // Regroup the composite-key fold by season.
    let mut by_season: std::collections::BTreeMap<i32, Vec<(&str, u32)>> =
        std::collections::BTreeMap::new();
    for ((team, season), t) in &totals {
        by_season.entry(*season).or_default().push((team, t.wins));
    }

    let mut seasons: Vec<SeasonParity> = Vec::with_capacity(by_season.len());
    let mut indices: Vec<(i32, f64)> = Vec::with_capacity(by_season.len());

    for (season, mut rows) in by_season {
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        let wins: Vec<u32> = rows.iter().map(|&(_, w)| w).collect();
        let n = wins.len();
        let entropy = shannon_entropy(&wins);
        let parity = parity_index(&wins);
        let max_entropy = if n > 1 { (n as f64).log2() } else { 0.0 };
        let (top_team, top_team_wins) = rows
            .first()
            .map(|&(t, w)| (t.to_string(), w))
            .unwrap_or_default();

        indices.push((season, parity));
        seasons.push(SeasonParity {
            season,
            teams: n as u32,
            total_wins: wins.iter().sum(),
            entropy: fixed3(entropy),
            max_entropy: fixed3(max_entropy),
            parity_index: fixed3(parity),
            gini: fixed3(gini(&wins)),
            top_team,
            top_team_wins,
        });
    }

    let most_balanced = indices
        .iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|&(season, p)| SeasonRef {
            season,
            parity_index: fixed3(p),
        });
    let most_lopsided = indices
        .iter()
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|&(season, p)| SeasonRef {
            season,
            parity_index: fixed3(p),
        });

    ParityResult {
        seasons,
        most_balanced,
        most_lopsided,
    }
}
