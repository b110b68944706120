//! Betting splits: against-the-spread and over/under records and streaks.
//!
//! The spread result is home-relative, so the away side's view is the
//! mirror image (a home cover is an away non-cover; pushes stay pushes).
//! Rows that carry a closing line but no stored verdict get the verdict
//! derived from the final score. Pushes and missing lines are skip events
//! for the streak machines — they close an active run and start nothing.
//! Zero-decision rates here render as `".000"`.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::engine::format::RATE_BARE;
use crate::engine::streak::{scan, Outcome};
use crate::model::{GameRecord, OuResult, SpreadResult};

const BOARD_CAP: usize = 10;
/// Lined decisions a team needs before the cover-rate boards list it.
const MIN_LINED_DECISIONS: u32 = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAts {
    pub team: String,
    pub covers: u32,
    pub non_covers: u32,
    pub pushes: u32,
    pub cover_rate: String,
    /// Signed: positive = active cover run, negative = active non-cover run.
    pub current_ats_streak: i32,
    pub longest_cover_streak: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamOverUnder {
    pub team: String,
    pub overs: u32,
    pub unders: u32,
    pub pushes: u32,
    pub over_rate: String,
    pub current_ou_streak: i32,
    pub longest_over_streak: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BettingResult {
    pub best_ats_teams: Vec<TeamAts>,
    pub worst_ats_teams: Vec<TeamAts>,
    pub most_overs: Vec<TeamOverUnder>,
    pub most_unders: Vec<TeamOverUnder>,
    /// Rows with a spread verdict, stored or derived from the line.
    pub lined_games: u32,
}

/// A team's spread outcome for one game, from its own sideline.
fn ats_outcome(g: &GameRecord, is_home: bool) -> Outcome {
    match g.effective_spread_result() {
        Some(SpreadResult::Covered) => {
            if is_home {
                Outcome::Win
            } else {
                Outcome::Loss
            }
        }
        Some(SpreadResult::Lost) => {
            if is_home {
                Outcome::Loss
            } else {
                Outcome::Win
            }
        }
        Some(SpreadResult::Push) | None => Outcome::Skip,
    }
}

fn ou_outcome(g: &GameRecord) -> Outcome {
    match g.effective_ou_result() {
        Some(OuResult::Over) => Outcome::Win,
        Some(OuResult::Under) => Outcome::Loss,
        Some(OuResult::Push) | None => Outcome::Skip,
    }
}

pub fn compute_betting(games: &[GameRecord]) -> BettingResult {
    #[derive(Default)]
    struct Acc {
        covers: u32,
        non_covers: u32,
        ats_pushes: u32,
        overs: u32,
        unders: u32,
        ou_pushes: u32,
    }

    let mut accs: BTreeMap<String, Acc> = BTreeMap::new();
    let mut lined_games = 0u32;

    for g in games {
        if g.effective_spread_result().is_some() {
            lined_games += 1;
        }
        for (team, is_home) in [(&g.home, true), (&g.away, false)] {
            let acc = accs.entry(team.clone()).or_default();
            match ats_outcome(g, is_home) {
                Outcome::Win => acc.covers += 1,
                Outcome::Loss => acc.non_covers += 1,
                Outcome::Skip => {
                    if g.effective_spread_result() == Some(SpreadResult::Push) {
                        acc.ats_pushes += 1;
                    }
                }
            }
            match ou_outcome(g) {
                Outcome::Win => acc.overs += 1,
                Outcome::Loss => acc.unders += 1,
                Outcome::Skip => {
                    if g.effective_ou_result() == Some(OuResult::Push) {
                        acc.ou_pushes += 1;
                    }
                }
            }
        }
    }

    let mut ats_rows: Vec<(f64, TeamAts)> = Vec::new();
    let mut ou_rows: Vec<(f64, TeamOverUnder)> = Vec::new();

    for (team, acc) in &accs {
        let ats_decisions = acc.covers + acc.non_covers;
        let ou_decisions = acc.overs + acc.unders;

        if ats_decisions >= MIN_LINED_DECISIONS {
            let streak = scan(games.iter().filter_map(|g| {
                let side = g.side_of(team)?;
                Some((ats_outcome(g, side == crate::model::Side::Home), g.season))
            }));
            ats_rows.push((
                acc.covers as f64 / ats_decisions as f64,
                TeamAts {
                    team: team.clone(),
                    covers: acc.covers,
                    non_covers: acc.non_covers,
                    pushes: acc.ats_pushes,
                    cover_rate: RATE_BARE.rate(acc.covers, ats_decisions),
                    current_ats_streak: streak.current,
                    longest_cover_streak: streak
                        .longest_win
                        .map(|r| r.length.unsigned_abs())
                        .unwrap_or(0),
                },
            ));
        }
        if ou_decisions >= MIN_LINED_DECISIONS {
            let streak = scan(
                games
                    .iter()
                    .filter(|g| g.side_of(team).is_some())
                    .map(|g| (ou_outcome(g), g.season)),
            );
            ou_rows.push((
                acc.overs as f64 / ou_decisions as f64,
                TeamOverUnder {
                    team: team.clone(),
                    overs: acc.overs,
                    unders: acc.unders,
                    pushes: acc.ou_pushes,
                    over_rate: RATE_BARE.rate(acc.overs, ou_decisions),
                    current_ou_streak: streak.current,
                    longest_over_streak: streak
                        .longest_win
                        .map(|r| r.length.unsigned_abs())
                        .unwrap_or(0),
                },
            ));
        }
    }

    ats_rows.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.1.covers.cmp(&a.1.covers))
            .then(a.1.team.cmp(&b.1.team))
    });
    ou_rows.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.1.overs.cmp(&a.1.overs))
            .then(a.1.team.cmp(&b.1.team))
    });

    let best_ats_teams: Vec<TeamAts> =
        ats_rows.iter().take(BOARD_CAP).map(|(_, r)| r.clone()).collect();
    let worst_ats_teams: Vec<TeamAts> = ats_rows
        .iter()
        .rev()
        .take(BOARD_CAP)
        .map(|(_, r)| r.clone())
        .collect();
    let most_overs: Vec<TeamOverUnder> =
        ou_rows.iter().take(BOARD_CAP).map(|(_, r)| r.clone()).collect();
    let most_unders: Vec<TeamOverUnder> = ou_rows
        .iter()
        .rev()
        .take(BOARD_CAP)
        .map(|(_, r)| r.clone())
        .collect();

    BettingResult {
        best_ats_teams,
        worst_ats_teams,
        most_overs,
        most_unders,
        lined_games,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_fixtures::game;

    fn lined(
        week: &str,
        home: &str,
        away: &str,
        sr: SpreadResult,
        our: OuResult,
    ) -> GameRecord {
        let mut g = game(2023, week, home, away, 24, 20);
        g.spread = Some(-3.0);
        g.over_under = Some(43.5);
        g.spread_result = Some(sr);
        g.ou_result = Some(our);
        g
    }

    fn team_schedule(n_covers: u32, n_losses: u32) -> Vec<GameRecord> {
        let mut games = Vec::new();
        let mut week = 1;
        for _ in 0..n_covers {
            games.push(lined(&week.to_string(), "A", "B", SpreadResult::Covered, OuResult::Over));
            week += 1;
        }
        for _ in 0..n_losses {
            games.push(lined(&week.to_string(), "A", "B", SpreadResult::Lost, OuResult::Under));
            week += 1;
        }
        games
    }

    #[test]
    fn away_side_mirrors_the_home_spread_result() {
        let games = team_schedule(7, 5);
        let r = compute_betting(&games);
        let a = r.best_ats_teams.iter().find(|t| t.team == "A").unwrap();
        let b = r.best_ats_teams.iter().find(|t| t.team == "B").unwrap();
        assert_eq!(a.covers, 7);
        assert_eq!(a.non_covers, 5);
        assert_eq!(b.covers, 5);
        assert_eq!(b.non_covers, 7);
        assert_eq!(a.cover_rate, "0.583");
    }

    #[test]
    fn pushes_and_missing_lines_break_streaks() {
        let mut games = team_schedule(10, 0);
        // a push, then two more covers: current streak restarts at 2
        games.push(lined("11", "A", "B", SpreadResult::Push, OuResult::Push));
        games.push(lined("12", "A", "B", SpreadResult::Covered, OuResult::Over));
        games.push(lined("13", "A", "B", SpreadResult::Covered, OuResult::Over));
        let r = compute_betting(&games);
        let a = r.best_ats_teams.iter().find(|t| t.team == "A").unwrap();
        assert_eq!(a.current_ats_streak, 2);
        assert_eq!(a.longest_cover_streak, 10);
        assert_eq!(a.pushes, 1);
    }

    #[test]
    fn unlined_rows_are_ignored_entirely() {
        let mut games = team_schedule(10, 2);
        games.push(game(2023, "13", "A", "B", 21, 17)); // no line
        let r = compute_betting(&games);
        assert_eq!(r.lined_games, 12);
        let a = r.best_ats_teams.iter().find(|t| t.team == "A").unwrap();
        assert_eq!(a.covers + a.non_covers + a.pushes, 12);
    }

    #[test]
    fn lines_without_stored_verdicts_still_count() {
        // Line present, verdict columns blank: derive from the score.
        // Home -3 and a 4-point home win is a cover; 44 total beats 38.5.
        let mut games = Vec::new();
        for w in 1..=12 {
            let mut g = game(2023, &w.to_string(), "A", "B", 24, 20);
            g.spread = Some(-3.0);
            g.over_under = Some(38.5);
            games.push(g);
        }
        let r = compute_betting(&games);
        assert_eq!(r.lined_games, 12);
        let a = r.best_ats_teams.iter().find(|t| t.team == "A").unwrap();
        assert_eq!(a.covers, 12);
        assert_eq!(a.longest_cover_streak, 12);
        let over = r.most_overs.iter().find(|t| t.team == "A").unwrap();
        assert_eq!(over.overs, 12);
        assert_eq!(over.over_rate, "1.000");
    }

    #[test]
    fn boards_require_ten_lined_decisions() {
        let games = team_schedule(5, 4); // 9 decisions
        let r = compute_betting(&games);
        assert!(r.best_ats_teams.is_empty());
        assert!(r.most_overs.is_empty());
    }

    #[test]
    fn over_under_is_shared_by_both_teams() {
        let games = team_schedule(6, 4);
        let r = compute_betting(&games);
        let a = r.most_overs.iter().find(|t| t.team == "A").unwrap();
        let b = r.most_overs.iter().find(|t| t.team == "B").unwrap();
        assert_eq!(a.overs, b.overs);
        assert_eq!(a.over_rate, "0.600");
        assert_eq!(b.over_rate, "0.600");
    }

    #[test]
    fn empty_input_is_fully_populated() {
        let r = compute_betting(&[]);
        assert!(r.best_ats_teams.is_empty());
        assert!(r.most_unders.is_empty());
        assert_eq!(r.lined_games, 0);
    }
}
