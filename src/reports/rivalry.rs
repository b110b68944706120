//! Rivalry history: head-to-head records for every team pair.
//!
//! Pairs are keyed alphabetically so "A vs B" and "B at A" accumulate into
//! the same series. The lopsided board needs real history (≥ 10 meetings)
//! before a series can be called one-sided.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::engine::format::avg1;
use crate::model::GameRecord;

const BOARD_CAP: usize = 10;
/// Meetings required before the lopsided board considers a series.
const MIN_MEETINGS: u32 = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rivalry {
    /// Alphabetically first team of the pair.
    pub team_a: String,
    pub team_b: String,
    pub meetings: u32,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub ties: u32,
    pub avg_total_points: String,
    pub first_season: i32,
    pub last_season: i32,
    /// Who holds the current head-to-head run, if anyone.
    pub streak_holder: String,
    pub streak_length: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RivalryResult {
    pub most_played: Vec<Rivalry>,
    pub most_lopsided: Vec<Rivalry>,
    pub total_series: u32,
}

#[derive(Debug, Default)]
struct SeriesAcc {
    meetings: u32,
    a_wins: u32,
    b_wins: u32,
    ties: u32,
    total_points: i64,
    first_season: i32,
    last_season: i32,
    /// Current run: winner name and length, reset by ties and flips.
    run: Option<(String, u32)>,
}

pub fn compute_rivalries(games: &[GameRecord]) -> RivalryResult {
    let mut series: BTreeMap<(String, String), SeriesAcc> = BTreeMap::new();

    for g in games {
        let (a, b) = if g.home <= g.away {
            (g.home.clone(), g.away.clone())
        } else {
            (g.away.clone(), g.home.clone())
        };
        let acc = series.entry((a.clone(), b)).or_insert_with(|| SeriesAcc {
            first_season: g.season,
            last_season: g.season,
            ..Default::default()
        });
        acc.meetings += 1;
        acc.total_points += g.total_points() as i64;
        acc.first_season = acc.first_season.min(g.season);
        acc.last_season = acc.last_season.max(g.season);
        match g.winner() {
            None => {
                acc.ties += 1;
                acc.run = None; // a tie resets the head-to-head run
            }
            Some(winner) => {
                if winner == a {
                    acc.a_wins += 1;
                } else {
                    acc.b_wins += 1;
                }
                acc.run = match acc.run.take() {
                    Some((holder, n)) if holder == winner => Some((holder, n + 1)),
                    _ => Some((winner.to_string(), 1)),
                };
            }
        }
    }

    let total_series = series.len() as u32;

    let rows: Vec<Rivalry> = series
        .into_iter()
        .map(|((team_a, team_b), acc)| {
            let (streak_holder, streak_length) = acc.run.unwrap_or_default();
            Rivalry {
                team_a,
                team_b,
                meetings: acc.meetings,
                team_a_wins: acc.a_wins,
                team_b_wins: acc.b_wins,
                ties: acc.ties,
                avg_total_points: avg1(acc.total_points, acc.meetings),
                first_season: acc.first_season,
                last_season: acc.last_season,
                streak_holder,
                streak_length,
            }
        })
        .collect();

    let mut most_played = rows.clone();
    most_played.sort_by(|a, b| {
        b.meetings
            .cmp(&a.meetings)
            .then(a.team_a.cmp(&b.team_a))
            .then(a.team_b.cmp(&b.team_b))
    });
    most_played.truncate(BOARD_CAP);

    let mut most_lopsided: Vec<Rivalry> = rows
        .into_iter()
        .filter(|r| r.meetings >= MIN_MEETINGS)
        .collect();
    most_lopsided.sort_by(|a, b| {
        let a_gap = a.team_a_wins.abs_diff(a.team_b_wins);
        let b_gap = b.team_a_wins.abs_diff(b.team_b_wins);
        b_gap
            .cmp(&a_gap)
            .then(a.team_a.cmp(&b.team_a))
            .then(a.team_b.cmp(&b.team_b))
    });
    most_lopsided.truncate(BOARD_CAP);

    RivalryResult {
        most_played,
        most_lopsided,
        total_series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_fixtures::game;

    #[test]
    fn home_and_away_meetings_merge_into_one_series() {
        let games = vec![
            game(2022, "1", "Bears", "Packers", 10, 27),
            game(2022, "10", "Packers", "Bears", 28, 19),
        ];
        let r = compute_rivalries(&games);
        assert_eq!(r.total_series, 1);
        let s = &r.most_played[0];
        assert_eq!(s.team_a, "Bears");
        assert_eq!(s.team_b, "Packers");
        assert_eq!(s.meetings, 2);
        assert_eq!(s.team_b_wins, 2);
        assert_eq!(s.streak_holder, "Packers");
        assert_eq!(s.streak_length, 2);
    }

    #[test]
    fn tie_resets_the_series_run() {
        let games = vec![
            game(2021, "1", "A", "B", 24, 10),
            game(2021, "10", "B", "A", 17, 17),
            game(2022, "1", "A", "B", 21, 20),
        ];
        let r = compute_rivalries(&games);
        let s = &r.most_played[0];
        assert_eq!(s.ties, 1);
        assert_eq!(s.streak_holder, "A");
        assert_eq!(s.streak_length, 1);
    }

    #[test]
    fn lopsided_board_needs_ten_meetings() {
        let mut games = Vec::new();
        // A sweeps B nine times: plenty lopsided but below the floor
        for w in 1..=9 {
            games.push(game(2023, &w.to_string(), "A", "B", 30, 10));
        }
        let r = compute_rivalries(&games);
        assert!(r.most_lopsided.is_empty());
        games.push(game(2023, "10", "B", "A", 13, 24));
        let r = compute_rivalries(&games);
        assert_eq!(r.most_lopsided.len(), 1);
        assert_eq!(r.most_lopsided[0].team_a_wins, 10);
    }

    #[test]
    fn series_metadata_spans_seasons() {
        let games = vec![
            game(1970, "3", "A", "B", 14, 10),
            game(2023, "3", "B", "A", 27, 24),
        ];
        let r = compute_rivalries(&games);
        let s = &r.most_played[0];
        assert_eq!(s.first_season, 1970);
        assert_eq!(s.last_season, 2023);
        assert_eq!(s.avg_total_points, "37.5");
    }

    #[test]
    fn most_played_sorted_by_meetings() {
        let mut games = Vec::new();
        for w in 1..=3 {
            games.push(game(2023, &w.to_string(), "A", "B", 20, 10));
        }
        games.push(game(2023, "4", "C", "D", 20, 10));
        let r = compute_rivalries(&games);
        assert_eq!(r.most_played[0].meetings, 3);
        assert_eq!(r.most_played[1].meetings, 1);
    }

    #[test]
    fn empty_input_is_fully_populated() {
        let r = compute_rivalries(&[]);
        assert_eq!(r.total_series, 0);
        assert!(r.most_played.is_empty());
        assert!(r.most_lopsided.is_empty());
    }
}
