//! Momentum: cumulative point differential over a season, week by week.
//!
//! Trends cover the most recent season in the input; swing and surplus
//! leaderboards span all input. Playoff rounds have no numeric week, so
//! those rows are skipped silently here — this report is a
//! regular-season-shape view.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::engine::streak::{scan, Outcome};
use crate::model::GameRecord;

const SWING_CAP: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub week: u32,
    /// Point differential of this game.
    pub diff: i32,
    /// Running sum through this game.
    pub cumulative: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTrend {
    pub team: String,
    pub season: i32,
    pub cumulative_point_diff: Vec<TrendPoint>,
    pub final_diff: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swing {
    pub team: String,
    pub season: i32,
    pub week: u32,
    pub diff: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurplusRun {
    pub team: String,
    pub length: u32,
    pub seasons: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumResult {
    /// Trends for the most recent season in the input.
    pub season: Option<i32>,
    pub team_trends: Vec<TeamTrend>,
    /// Largest single-game point swings across all input.
    pub biggest_swings: Vec<Swing>,
    /// Longest runs of consecutive games outscoring the opponent.
    pub longest_surplus_runs: Vec<SurplusRun>,
}

pub fn compute_momentum(games: &[GameRecord]) -> MomentumResult {
    let season = games.iter().map(|g| g.season).max();

    let mut trends: BTreeMap<String, TeamTrend> = BTreeMap::new();
    let mut swings: Vec<Swing> = Vec::new();

    for g in games {
        let Some(week) = g.week_number() else {
            continue; // playoff labels and malformed weeks
        };
        for (team, scored, allowed) in [
            (&g.home, g.home_score, g.away_score),
            (&g.away, g.away_score, g.home_score),
        ] {
            let diff = scored - allowed;
            if Some(g.season) == season {
                let trend = trends.entry(team.clone()).or_insert_with(|| TeamTrend {
                    team: team.clone(),
                    season: g.season,
                    cumulative_point_diff: Vec::new(),
                    final_diff: 0,
                });
                trend.final_diff += diff;
                trend.cumulative_point_diff.push(TrendPoint {
                    week,
                    diff,
                    cumulative: trend.final_diff,
                });
            }
            swings.push(Swing {
                team: team.clone(),
                season: g.season,
                week,
                diff,
            });
        }
    }

    swings.sort_by(|a, b| {
        b.diff
            .abs()
            .cmp(&a.diff.abs())
            .then(a.season.cmp(&b.season))
            .then(a.team.cmp(&b.team))
    });
    swings.truncate(SWING_CAP);

    // Surplus runs: the streak machine over positive-margin games, ties skip.
    let mut team_names: Vec<&str> = games
        .iter()
        .flat_map(|g| [g.home.as_str(), g.away.as_str()])
        .collect();
    team_names.sort_unstable();
    team_names.dedup();

    let mut runs: Vec<SurplusRun> = team_names
        .iter()
        .filter_map(|team| {
            let summary = scan(games.iter().filter_map(|g| {
                let side = g.side_of(team)?;
                let (scored, allowed) = g.scored_allowed(side);
                let outcome = match scored.cmp(&allowed) {
                    std::cmp::Ordering::Greater => Outcome::Win,
                    std::cmp::Ordering::Less => Outcome::Loss,
                    std::cmp::Ordering::Equal => Outcome::Skip,
                };
                Some((outcome, g.season))
            }));
            summary.longest_win.map(|run| SurplusRun {
                team: team.to_string(),
                length: run.length.unsigned_abs(),
                seasons: if run.first_season == run.last_season {
                    run.first_season.to_string()
                } else {
                    format!("{}-{}", run.first_season, run.last_season)
                },
            })
        })
        .collect();
    runs.sort_by(|a, b| b.length.cmp(&a.length).then(a.team.cmp(&b.team)));
    runs.truncate(SWING_CAP);

    MomentumResult {
        season,
        team_trends: trends.into_values().collect(),
        biggest_swings: swings,
        longest_surplus_runs: runs,
    }
}
