//! Composite power-score ranking.
//!
//! The composite blends four ingredients with fixed weights:
//!   - 40% win percentage
//!   - 20% strength of schedule
//!   - 25% normalized point differential
//!   - 15% recent form (win rate over the last 10 decisive games)
//!
//! Strength of schedule is a single pass: each team's SOS is the plain
//! average of its opponents' overall win percentages over the same game set.
//! Deliberately not an Elo-style fixed point — the dashboards expect the
//! one-pass proxy, so keep it that way.

use std::collections::BTreeMap;

use crate::engine::group::{fold_by_team, TeamTotals};
use crate::model::GameRecord;

pub const W_WIN_PCT: f64 = 0.40;
pub const W_SOS: f64 = 0.20;
pub const W_POINT_DIFF: f64 = 0.25;
pub const W_RECENT_FORM: f64 = 0.15;

/// Per-game point differential that saturates the normalized component.
/// Two scores per game is a blowout-level sustained margin.
const POINT_DIFF_SCALE: f64 = 15.0;

/// How many trailing decisive games feed the recent-form component.
pub const RECENT_FORM_WINDOW: usize = 10;

/// Component breakdown for one ranked team. All values are raw fractions;
/// formatting belongs to the report layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerScore {
    pub team: String,
    pub composite: f64,
    pub win_pct: f64,
    pub sos: f64,
    /// Point differential mapped into [0, 1] (0.5 = even).
    pub norm_point_diff: f64,
    /// Raw season point differential, kept for display.
    pub point_diff: i64,
    pub recent_form: f64,
    pub wins: u32,
    pub losses: u32,
    pub decisions: u32,
}

/// Compute power scores for every team with at least `min_decisions`
/// decisive games, sorted best-first with deterministic tie-breaks
/// (composite, then raw wins, then team name ascending).
///
/// The threshold filters *before* the sort — an under-sampled team never
/// enters the ranking at all. Callers truncate to their top-N afterwards.
pub fn compute_power_scores(games: &[GameRecord], min_decisions: u32) -> Vec<PowerScore> {
    let totals = fold_by_team(games);
    let mut scores: Vec<PowerScore> = totals
        .iter()
        .filter(|(_, t)| t.decisions() >= min_decisions && t.decisions() > 0)
        .map(|(team, t)| score_team(team, t, games, &totals))
        .collect();

    scores.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.wins.cmp(&a.wins))
            .then(a.team.cmp(&b.team))
    });
    scores
}

fn score_team(
    team: &str,
    totals: &TeamTotals,
    games: &[GameRecord],
    all: &BTreeMap<String, TeamTotals>,
) -> PowerScore {
    let win_pct = totals.win_pct();
    let sos = strength_of_schedule(team, games, all);
    let norm_point_diff = normalize_point_diff(totals);
    let recent_form = recent_form(team, games);

    let composite = W_WIN_PCT * win_pct
        + W_SOS * sos
        + W_POINT_DIFF * norm_point_diff
        + W_RECENT_FORM * recent_form;

    PowerScore {
        team: team.to_string(),
        composite,
        win_pct,
        sos,
        norm_point_diff,
        point_diff: totals.point_diff(),
        recent_form,
        wins: totals.wins,
        losses: totals.losses,
        decisions: totals.decisions(),
    }
}

/// One-pass SOS: average of opponents' overall win percentage, one sample
/// per game played (repeat opponents count each time).
fn strength_of_schedule(
    team: &str,
    games: &[GameRecord],
    all: &BTreeMap<String, TeamTotals>,
) -> f64 {
    let mut sum = 0.0;
    let mut n = 0u32;
    for g in games {
        let opponent = if g.home == team {
            &g.away
        } else if g.away == team {
            &g.home
        } else {
            continue;
        };
        if let Some(t) = all.get(opponent) {
            sum += t.win_pct();
            n += 1;
        }
    }
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Map average per-game point differential into [0, 1], clamped at
/// ±`POINT_DIFF_SCALE`. 0.5 means a dead-even point diff.
fn normalize_point_diff(totals: &TeamTotals) -> f64 {
    if totals.games == 0 {
        return 0.5;
    }
    let per_game = totals.point_diff() as f64 / totals.games as f64;
    let clamped = (per_game / POINT_DIFF_SCALE).clamp(-1.0, 1.0);
    (clamped + 1.0) / 2.0
}

/// Win rate over the team's last `RECENT_FORM_WINDOW` decisive games
/// (input order is chronological). Falls back to 0.0 with no decisions.
fn recent_form(team: &str, games: &[GameRecord]) -> f64 {
    let mut results: Vec<bool> = games.iter().filter_map(|g| g.won_by(team)).collect();
    if results.is_empty() {
        return 0.0;
    }
    if results.len() > RECENT_FORM_WINDOW {
        results = results.split_off(results.len() - RECENT_FORM_WINDOW);
    }
    let wins = results.iter().filter(|&&w| w).count();
    wins as f64 / results.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_fixtures::game;
    use approx::assert_relative_eq;

    fn round_robin() -> Vec<GameRecord> {
        vec![
            // A beats everyone, B beats C and D, C beats D
            game(2023, "1", "A", "B", 27, 20),
            game(2023, "2", "C", "A", 13, 30),
            game(2023, "3", "A", "D", 41, 7),
            game(2023, "4", "B", "C", 24, 17),
            game(2023, "5", "D", "B", 10, 21),
            game(2023, "6", "C", "D", 20, 14),
        ]
    }

    #[test]
    fn undefeated_team_ranks_first() {
        let scores = compute_power_scores(&round_robin(), 1);
        assert_eq!(scores[0].team, "A");
        assert_relative_eq!(scores[0].win_pct, 1.0, epsilon = 1e-12);
        assert_eq!(scores.last().unwrap().team, "D");
    }

    #[test]
    fn weights_sum_to_one() {
        assert_relative_eq!(
            W_WIN_PCT + W_SOS + W_POINT_DIFF + W_RECENT_FORM,
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn sos_is_average_of_opponent_win_pct() {
        let games = round_robin();
        let totals = fold_by_team(&games);
        // A played B (2-1 → .667), C (1-2 → .333), D (0-3 → .000)
        let sos = strength_of_schedule("A", &games, &totals);
        assert_relative_eq!(sos, (2.0 / 3.0 + 1.0 / 3.0 + 0.0) / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn min_decisions_filters_before_ranking() {
        let mut games = round_robin();
        // E plays a single game and wins it big
        games.push(game(2023, "7", "E", "D", 45, 0));
        let scores = compute_power_scores(&games, 2);
        assert!(scores.iter().all(|s| s.team != "E"));
    }

    #[test]
    fn tie_break_is_wins_then_name() {
        // Two teams with identical everything: same opponent, same scores.
        let games = vec![
            game(2023, "1", "X", "Z", 20, 10),
            game(2023, "2", "Y", "Z", 20, 10),
        ];
        let scores = compute_power_scores(&games, 1);
        let x = scores.iter().position(|s| s.team == "X").unwrap();
        let y = scores.iter().position(|s| s.team == "Y").unwrap();
        assert!(x < y, "alphabetical tie-break should put X before Y");
    }

    #[test]
    fn recent_form_uses_trailing_window() {
        // 12 games: 2 early losses, then 10 straight wins → form 1.0
        let mut games = Vec::new();
        for w in 1..=2 {
            games.push(game(2023, &w.to_string(), "Opp", "Team", 21, 14));
        }
        for w in 3..=12 {
            games.push(game(2023, &w.to_string(), "Team", "Opp", 28, 3));
        }
        assert_relative_eq!(recent_form("Team", &games), 1.0, epsilon = 1e-12);
        // Overall win pct is 10/12, form must be strictly higher
        let totals = fold_by_team(&games);
        assert!(recent_form("Team", &games) > totals["Team"].win_pct());
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        assert!(compute_power_scores(&[], 1).is_empty());
    }

    #[test]
    fn normalized_point_diff_saturates() {
        let mut t = TeamTotals::default();
        t.record_game(60, 0);
        assert_relative_eq!(normalize_point_diff(&t), 1.0, epsilon = 1e-12);
        let mut even = TeamTotals::default();
        even.record_game(20, 20);
        assert_relative_eq!(normalize_point_diff(&even), 0.5, epsilon = 1e-12);
    }
}
