//! Primetime splits: team records under the lights (MNF/TNF/SNF) against
//! their daytime selves.
//!
//! The best/worst primetime boards require at least 3 primetime decisions,
//! applied before ranking — an under-sampled team is absent, never flagged.
//! Zero-decision rates render as `"0.000"` here.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::engine::format::{avg1, RATE_ZERO};
use crate::engine::group::TeamTotals;
use crate::model::GameRecord;

/// Primetime decisions required to enter the best/worst boards.
const MIN_PRIMETIME_DECISIONS: u32 = 3;
const BOARD_CAP: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    pub slot: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPrimetime {
    pub team: String,
    pub primetime_wins: u32,
    pub primetime_losses: u32,
    pub primetime_win_pct: String,
    pub daytime_win_pct: String,
    pub slots: Vec<SlotRecord>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimetimeResult {
    pub best_primetime_teams: Vec<TeamPrimetime>,
    pub worst_primetime_teams: Vec<TeamPrimetime>,
    /// League scoring: primetime vs daytime points per game.
    pub avg_points_primetime: String,
    pub avg_points_daytime: String,
    pub primetime_games: u32,
}

pub fn compute_primetime(games: &[GameRecord]) -> PrimetimeResult {
    // team → (primetime totals, daytime totals, per-slot totals)
    let mut by_team: BTreeMap<String, (TeamTotals, TeamTotals, BTreeMap<String, TeamTotals>)> =
        BTreeMap::new();
    let mut pt_points = 0i64;
    let mut pt_games = 0u32;
    let mut day_points = 0i64;
    let mut day_games = 0u32;

    for g in games {
        let is_pt = !g.primetime.is_empty();
        if is_pt {
            pt_points += g.total_points() as i64;
            pt_games += 1;
        } else {
            day_points += g.total_points() as i64;
            day_games += 1;
        }
        for (team, scored, allowed) in [
            (&g.home, g.home_score, g.away_score),
            (&g.away, g.away_score, g.home_score),
        ] {
            let entry = by_team.entry(team.clone()).or_default();
            if is_pt {
                entry.0.record_game(scored, allowed);
                entry
                    .2
                    .entry(g.primetime.clone())
                    .or_default()
                    .record_game(scored, allowed);
            } else {
                entry.1.record_game(scored, allowed);
            }
        }
    }

    let mut qualified: Vec<(f64, TeamPrimetime)> = by_team
        .iter()
        .filter(|(_, (pt, _, _))| pt.decisions() >= MIN_PRIMETIME_DECISIONS)
        .map(|(team, (pt, day, slots))| {
            let row = TeamPrimetime {
                team: team.clone(),
                primetime_wins: pt.wins,
                primetime_losses: pt.losses,
                primetime_win_pct: RATE_ZERO.rate(pt.wins, pt.decisions()),
                daytime_win_pct: RATE_ZERO.rate(day.wins, day.decisions()),
                slots: slots
                    .iter()
                    .map(|(slot, t)| SlotRecord {
                        slot: slot.clone(),
                        games: t.games,
                        wins: t.wins,
                        losses: t.losses,
                        win_pct: RATE_ZERO.rate(t.wins, t.decisions()),
                    })
                    .collect(),
            };
            (pt.win_pct(), row)
        })
        .collect();

    qualified.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.1.primetime_wins.cmp(&a.1.primetime_wins))
            .then(a.1.team.cmp(&b.1.team))
    });

    let best_primetime_teams: Vec<TeamPrimetime> = qualified
        .iter()
        .take(BOARD_CAP)
        .map(|(_, row)| row.clone())
        .collect();
    let worst_primetime_teams: Vec<TeamPrimetime> = qualified
        .iter()
        .rev()
        .take(BOARD_CAP)
        .map(|(_, row)| row.clone())
        .collect();

    PrimetimeResult {
        best_primetime_teams,
        worst_primetime_teams,
        avg_points_primetime: avg1(pt_points, pt_games),
        avg_points_daytime: avg1(day_points, day_games),
        primetime_games: pt_games,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_fixtures::game;

    fn pt_game(week: &str, home: &str, away: &str, hs: i32, aws: i32, slot: &str) -> GameRecord {
        let mut g = game(2023, week, home, away, hs, aws);
        g.primetime = slot.to_string();
        g
    }

    #[test]
    fn threshold_applies_before_ranking() {
        let games = vec![
            // A: 3 primetime decisions, B: 1 (as the opponent 3 times it has 3 too)
            pt_game("1", "A", "B", 24, 10, "MNF"),
            pt_game("2", "A", "B", 27, 20, "SNF"),
            pt_game("3", "B", "A", 13, 30, "TNF"),
            pt_game("4", "C", "D", 21, 17, "MNF"), // C and D: 1 decision each
        ];
        let r = compute_primetime(&games);
        assert!(r.best_primetime_teams.iter().any(|t| t.team == "A"));
        assert!(!r.best_primetime_teams.iter().any(|t| t.team == "C"));
        assert!(!r.best_primetime_teams.iter().any(|t| t.team == "D"));
    }

    #[test]
    fn slot_records_split_by_label() {
        let games = vec![
            pt_game("1", "A", "B", 24, 10, "MNF"),
            pt_game("2", "A", "B", 27, 20, "MNF"),
            pt_game("3", "B", "A", 13, 30, "SNF"),
        ];
        let r = compute_primetime(&games);
        let a = r
            .best_primetime_teams
            .iter()
            .find(|t| t.team == "A")
            .unwrap();
        let mnf = a.slots.iter().find(|s| s.slot == "MNF").unwrap();
        assert_eq!(mnf.games, 2);
        assert_eq!(mnf.wins, 2);
        assert_eq!(mnf.win_pct, "1.000");
        assert_eq!(a.primetime_win_pct, "1.000");
    }

    #[test]
    fn daytime_and_primetime_scoring_split() {
        let games = vec![
            pt_game("1", "A", "B", 30, 20, "SNF"), // 50 points primetime
            game(2023, "2", "A", "B", 10, 10),     // 20 points daytime
        ];
        let r = compute_primetime(&games);
        assert_eq!(r.avg_points_primetime, "50.0");
        assert_eq!(r.avg_points_daytime, "20.0");
        assert_eq!(r.primetime_games, 1);
    }

    #[test]
    fn worst_board_is_the_tail_of_the_same_ranking() {
        let games = vec![
            pt_game("1", "A", "B", 24, 10, "MNF"),
            pt_game("2", "A", "B", 27, 20, "MNF"),
            pt_game("3", "A", "B", 30, 13, "SNF"),
        ];
        let r = compute_primetime(&games);
        assert_eq!(r.best_primetime_teams[0].team, "A");
        assert_eq!(r.worst_primetime_teams[0].team, "B");
        let b = &r.worst_primetime_teams[0];
        assert_eq!(b.primetime_win_pct, "0.000");
    }

    #[test]
    fn daytime_pct_uses_zero_sentinel_without_daytime_games() {
        let games = vec![
            pt_game("1", "A", "B", 24, 10, "MNF"),
            pt_game("2", "A", "B", 27, 20, "TNF"),
            pt_game("3", "A", "B", 30, 13, "SNF"),
        ];
        let r = compute_primetime(&games);
        let a = &r.best_primetime_teams[0];
        assert_eq!(a.daytime_win_pct, "0.000");
    }

    #[test]
    fn empty_input_is_fully_populated() {
        let r = compute_primetime(&[]);
        assert!(r.best_primetime_teams.is_empty());
        assert_eq!(r.avg_points_primetime, "0.0");
        assert_eq!(r.primetime_games, 0);
    }
}
