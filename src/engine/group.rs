//! Grouping/reduction primitive: single-pass keyed folds over game lists.
//!
//! A game touches two entities, so the per-team fold records both sides from
//! the same row in the same iteration — a team's win is its opponent's loss
//! in the same pass, never a re-scan.

use std::collections::BTreeMap;

use crate::model::{GameRecord, Side};

/// Win/loss accumulator for one entity (team, team+season, bucket...).
///
/// Ties count toward `games` and the point sums but not toward decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamTotals {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: i64,
    pub points_against: i64,
    pub games: u32,
}

impl TeamTotals {
    pub fn record_game(&mut self, scored: i32, allowed: i32) {
        self.games += 1;
        self.points_for += scored as i64;
        self.points_against += allowed as i64;
        match scored.cmp(&allowed) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.ties += 1,
        }
    }

    /// Decisive games only (ties excluded from the denominator).
    pub fn decisions(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win percentage over decisive games; 0.0 with no decisions.
    pub fn win_pct(&self) -> f64 {
        let d = self.decisions();
        if d == 0 {
            0.0
        } else {
            self.wins as f64 / d as f64
        }
    }

    pub fn point_diff(&self) -> i64 {
        self.points_for - self.points_against
    }

    /// Average points scored per game; 0.0 with no games.
    pub fn avg_points_for(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.points_for as f64 / self.games as f64
        }
    }

    pub fn avg_points_against(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.points_against as f64 / self.games as f64
        }
    }
}

/// Fold every game into per-team totals in one linear pass.
///
/// `BTreeMap` keeps iteration order deterministic for downstream ranking.
pub fn fold_by_team(games: &[GameRecord]) -> BTreeMap<String, TeamTotals> {
    let mut totals: BTreeMap<String, TeamTotals> = BTreeMap::new();
    for g in games {
        totals
            .entry(g.home.clone())
            .or_default()
            .record_game(g.home_score, g.away_score);
        totals
            .entry(g.away.clone())
            .or_default()
            .record_game(g.away_score, g.home_score);
    }
    totals
}

/// Per-team totals restricted to one side of the ball.
pub fn fold_by_team_side(games: &[GameRecord], side: Side) -> BTreeMap<String, TeamTotals> {
    let mut totals: BTreeMap<String, TeamTotals> = BTreeMap::new();
    for g in games {
        let (team, scored, allowed) = match side {
            Side::Home => (&g.home, g.home_score, g.away_score),
            Side::Away => (&g.away, g.away_score, g.home_score),
        };
        totals
            .entry(team.clone())
            .or_default()
            .record_game(scored, allowed);
    }
    totals
}

/// Per-(team, season) totals with a typed composite key.
pub fn fold_by_team_season(games: &[GameRecord]) -> BTreeMap<(String, i32), TeamTotals> {
    let mut totals: BTreeMap<(String, i32), TeamTotals> = BTreeMap::new();
    for g in games {
        totals
            .entry((g.home.clone(), g.season))
            .or_default()
            .record_game(g.home_score, g.away_score);
        totals
            .entry((g.away.clone(), g.season))
            .or_default()
            .record_game(g.away_score, g.home_score);
    }
    totals
}

/// Generic single-pass categorical fold. `key_fn` returning `None` skips the
/// row (e.g. a game with no weather facet); both teams land in the same
/// bucket, with the home side folded first.
pub fn fold_by_key<K, F>(games: &[GameRecord], mut key_fn: F) -> BTreeMap<K, TeamTotals>
where
    K: Ord,
    F: FnMut(&GameRecord) -> Option<K>,
{
    let mut totals: BTreeMap<K, TeamTotals> = BTreeMap::new();
    for g in games {
        if let Some(key) = key_fn(g) {
            let acc = totals.entry(key).or_default();
            acc.record_game(g.home_score, g.away_score);
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_fixtures::game;
    use approx::assert_relative_eq;

    #[test]
    fn both_sides_folded_from_one_row() {
        let games = vec![game(2023, "1", "Eagles", "Cowboys", 28, 23)];
        let totals = fold_by_team(&games);
        assert_eq!(totals["Eagles"].wins, 1);
        assert_eq!(totals["Cowboys"].losses, 1);
        assert_eq!(totals["Cowboys"].points_for, 23);
        assert_eq!(totals["Eagles"].points_against, 23);
    }

    #[test]
    fn ties_count_games_not_decisions() {
        let games = vec![
            game(2022, "1", "Colts", "Texans", 20, 20),
            game(2022, "2", "Colts", "Chiefs", 20, 17),
        ];
        let totals = fold_by_team(&games);
        let colts = totals["Colts"];
        assert_eq!(colts.games, 2);
        assert_eq!(colts.ties, 1);
        assert_eq!(colts.decisions(), 1);
        assert_relative_eq!(colts.win_pct(), 1.0, epsilon = 1e-12);
        assert_eq!(colts.points_for, 40);
    }

    #[test]
    fn zero_decisions_yields_zero_pct_not_nan() {
        let games = vec![game(2022, "1", "Colts", "Texans", 20, 20)];
        let totals = fold_by_team(&games);
        assert_relative_eq!(totals["Texans"].win_pct(), 0.0, epsilon = 1e-12);
        assert!(totals["Texans"].win_pct().is_finite());
    }

    #[test]
    fn side_restricted_fold() {
        let games = vec![
            game(2023, "1", "Packers", "Bears", 24, 10),
            game(2023, "2", "Bears", "Packers", 17, 20),
        ];
        let home = fold_by_team_side(&games, Side::Home);
        assert_eq!(home["Packers"].games, 1);
        assert_eq!(home["Packers"].wins, 1);
        assert_eq!(home["Bears"].losses, 1);
        let away = fold_by_team_side(&games, Side::Away);
        assert_eq!(away["Packers"].wins, 1);
        assert_eq!(away["Bears"].losses, 1);
    }

    #[test]
    fn composite_key_splits_seasons() {
        let games = vec![
            game(2021, "1", "Rams", "Bears", 34, 14),
            game(2022, "1", "Rams", "Bills", 10, 31),
        ];
        let totals = fold_by_team_season(&games);
        assert_eq!(totals[&("Rams".to_string(), 2021)].wins, 1);
        assert_eq!(totals[&("Rams".to_string(), 2022)].losses, 1);
        assert_eq!(totals.len(), 4);
    }

    #[test]
    fn keyed_fold_skips_none() {
        let games = vec![
            game(2023, "1", "A", "B", 21, 14),
            game(2023, "WildCard", "C", "D", 7, 3),
        ];
        let by_week = fold_by_key(&games, |g| g.week_number());
        assert_eq!(by_week.len(), 1);
        assert_eq!(by_week[&1].games, 1);
    }
}
