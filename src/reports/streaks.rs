//! Win/loss streaks per team: current, longest, and home/away variants.
//!
//! Ties break an active run without starting one. A team with zero decisive
//! games still appears with a current streak of 0 but never reaches the
//! longest-streak leaderboards.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{GameRecord, Side};
use crate::engine::streak::{scan, Outcome, Run, StreakSummary};

const LEADER_CAP: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStreaks {
    pub team: String,
    /// Signed: positive = active win run, negative = active loss run.
    pub current_streak: i32,
    pub longest_win_streak: u32,
    /// Seasons the longest win streak spanned, e.g. "2021-2022"; empty
    /// when the team has no win streak.
    pub longest_win_seasons: String,
    pub longest_loss_streak: u32,
    pub longest_loss_seasons: String,
    pub current_home_streak: i32,
    pub current_away_streak: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakLeader {
    pub team: String,
    pub length: u32,
    pub seasons: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreaksResult {
    pub teams: Vec<TeamStreaks>,
    pub longest_win_streaks: Vec<StreakLeader>,
    pub longest_loss_streaks: Vec<StreakLeader>,
}

pub fn compute_streaks(games: &[GameRecord]) -> StreaksResult {
    let mut summaries: BTreeMap<String, (StreakSummary, StreakSummary, StreakSummary)> =
        BTreeMap::new();

    for team in team_names(games) {
        let overall = scan_team(games, &team, None);
        let home = scan_team(games, &team, Some(Side::Home));
        let away = scan_team(games, &team, Some(Side::Away));
        summaries.insert(team, (overall, home, away));
    }

    let teams: Vec<TeamStreaks> = summaries
        .iter()
        .map(|(team, (overall, home, away))| TeamStreaks {
            team: team.clone(),
            current_streak: overall.current,
            longest_win_streak: run_len(overall.longest_win),
            longest_win_seasons: season_range(overall.longest_win),
            longest_loss_streak: run_len(overall.longest_loss),
            longest_loss_seasons: season_range(overall.longest_loss),
            current_home_streak: home.current,
            current_away_streak: away.current,
        })
        .collect();

    let longest_win_streaks = leaders(&summaries, |s| s.longest_win);
    let longest_loss_streaks = leaders(&summaries, |s| s.longest_loss);

    StreaksResult {
        teams,
        longest_win_streaks,
        longest_loss_streaks,
    }
}

fn scan_team(games: &[GameRecord], team: &str, side: Option<Side>) -> StreakSummary {
    scan(games.iter().filter_map(|g| {
        let played = g.side_of(team)?;
        if let Some(want) = side {
            if played != want {
                return None;
            }
        }
        let outcome = match g.won_by(team) {
            Some(true) => Outcome::Win,
            Some(false) => Outcome::Loss,
            None => Outcome::Skip, // tie
        };
        Some((outcome, g.season))
    }))
}

fn team_names(games: &[GameRecord]) -> Vec<String> {
    let mut names: Vec<String> = games
        .iter()
        .flat_map(|g| [g.home.clone(), g.away.clone()])
        .collect();
    names.sort();
    names.dedup();
    names
}

fn run_len(run: Option<Run>) -> u32 {
    run.map(|r| r.length.unsigned_abs()).unwrap_or(0)
}

fn season_range(run: Option<Run>) -> String {
    match run {
        None => String::new(),
        Some(r) if r.first_season == r.last_season => r.first_season.to_string(),
        Some(r) => format!("{}-{}", r.first_season, r.last_season),
    }
}

fn leaders<F>(
    summaries: &BTreeMap<String, (StreakSummary, StreakSummary, StreakSummary)>,
    pick: F,
) -> Vec<StreakLeader>
where
    F: Fn(&StreakSummary) -> Option<Run>,
{
    let mut rows: Vec<StreakLeader> = summaries
        .iter()
        .filter(|(_, (overall, _, _))| overall.decisions > 0)
        .filter_map(|(team, (overall, _, _))| {
            pick(overall).map(|run| StreakLeader {
                team: team.clone(),
                length: run.length.unsigned_abs(),
                seasons: season_range(Some(run)),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.length.cmp(&a.length).then(a.team.cmp(&b.team)));
    rows.truncate(LEADER_CAP);
    rows
}
