//! Home-field advantage: league-wide and per-team home/away splits.
//!
//! Ties are excluded from every win-percentage denominator but still count
//! toward game totals and scoring averages. This report family renders the
//! zero-decision rate as `".000"`.

use serde::Serialize;

use crate::engine::format::{avg1, RATE_BARE};
use crate::engine::group::{fold_by_key, fold_by_team_side};
use crate::model::{GameRecord, Side};

const LEADER_CAP: usize = 10;
/// Home decisions required before a team can lead the home-record board.
const MIN_HOME_DECISIONS: u32 = 5;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueHomeSplit {
    pub games: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    pub ties: u32,
    pub home_win_pct: String,
    pub avg_home_points: String,
    pub avg_away_points: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonHomeSplit {
    pub season: i32,
    pub games: u32,
    pub home_wins: u32,
    pub home_win_pct: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamHomeRecord {
    pub team: String,
    pub home_wins: u32,
    pub home_losses: u32,
    pub home_win_pct: String,
    pub away_win_pct: String,
    /// Home minus away win percentage, the team's home edge.
    pub edge: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFieldResult {
    pub league: LeagueHomeSplit,
    pub by_season: Vec<SeasonHomeSplit>,
    pub best_home_teams: Vec<TeamHomeRecord>,
}

pub fn compute_home_field(games: &[GameRecord]) -> HomeFieldResult {
    let mut home_wins = 0u32;
    let mut away_wins = 0u32;
    let mut ties = 0u32;
    let mut home_points = 0i64;
    let mut away_points = 0i64;

    for g in games {
        home_points += g.home_score as i64;
        away_points += g.away_score as i64;
        match g.home_score.cmp(&g.away_score) {
            std::cmp::Ordering::Greater => home_wins += 1,
            std::cmp::Ordering::Less => away_wins += 1,
            std::cmp::Ordering::Equal => ties += 1,
        }
    }

    let games_total = games.len() as u32;
    let league = LeagueHomeSplit {
        games: games_total,
        home_wins,
        away_wins,
        ties,
        home_win_pct: RATE_BARE.rate(home_wins, home_wins + away_wins),
        avg_home_points: avg1(home_points, games_total),
        avg_away_points: avg1(away_points, games_total),
    };

    // Season split via the home-side keyed fold (one pass).
    let by_season_totals = fold_by_key(games, |g| Some(g.season));
    let by_season = by_season_totals
        .into_iter()
        .map(|(season, t)| SeasonHomeSplit {
            season,
            games: t.games,
            home_wins: t.wins,
            home_win_pct: RATE_BARE.rate(t.wins, t.decisions()),
        })
        .collect();

    let home = fold_by_team_side(games, Side::Home);
    let away = fold_by_team_side(games, Side::Away);
    let mut best_home_teams: Vec<TeamHomeRecord> = home
        .iter()
        .filter(|(_, t)| t.decisions() >= MIN_HOME_DECISIONS)
        .map(|(team, h)| {
            let a = away.get(team).copied().unwrap_or_default();
            TeamHomeRecord {
                team: team.clone(),
                home_wins: h.wins,
                home_losses: h.losses,
                home_win_pct: RATE_BARE.rate(h.wins, h.decisions()),
                away_win_pct: RATE_BARE.rate(a.wins, a.decisions()),
                edge: format!("{:.3}", h.win_pct() - a.win_pct()),
            }
        })
        .collect();
    best_home_teams.sort_by(|a, b| {
        b.home_win_pct
            .cmp(&a.home_win_pct)
            .then(b.home_wins.cmp(&a.home_wins))
            .then(a.team.cmp(&b.team))
    });
    best_home_teams.truncate(LEADER_CAP);

    HomeFieldResult {
        league,
        by_season,
        best_home_teams,
    }
}
