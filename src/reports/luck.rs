//! Pythagorean luck: actual wins against point-differential expectation.
//!
//! Expected wins use the 2.37-exponent Pythagorean formula per team-season.
//! "Luck" is actual minus expected; teams beating their expectation in more
//! than half of their tracked seasons are flagged as consistently over.

use serde::Serialize;

use crate::engine::format::{fixed2, signed2};
use crate::engine::group::fold_by_team_season;
use crate::engine::measures::pythagorean_wins;
use crate::model::GameRecord;

const LEADER_CAP: usize = 10;
/// Seasons needed before a team qualifies for the consistency flag.
const MIN_SEASONS_TRACKED: usize = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonLuck {
    pub team: String,
    pub season: i32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub expected_wins: String,
    /// Signed two decimals, e.g. "+1.26" / "-0.40".
    pub over_under: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistentTeam {
    pub team: String,
    pub seasons_tracked: u32,
    pub seasons_over: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckResult {
    pub luckiest: Vec<TeamSeasonLuck>,
    pub unluckiest: Vec<TeamSeasonLuck>,
    pub consistently_over: Vec<ConsistentTeam>,
}

pub fn compute_luck(games: &[GameRecord]) -> LuckResult {
    let totals = fold_by_team_season(games);

    struct Row {
        entry: TeamSeasonLuck,
        luck: f64,
    }

    let mut rows: Vec<Row> = Vec::with_capacity(totals.len());
    let mut per_team: std::collections::BTreeMap<&str, (u32, u32)> =
        std::collections::BTreeMap::new();

    for ((team, season), t) in &totals {
        if t.games == 0 {
            continue;
        }
        let expected = pythagorean_wins(t.points_for, t.points_against, t.games);
        let luck = t.wins as f64 - expected;
        let tracked = per_team.entry(team).or_default();
        tracked.0 += 1;
        if luck > 0.0 {
            tracked.1 += 1;
        }
        rows.push(Row {
            entry: TeamSeasonLuck {
                team: team.clone(),
                season: *season,
                wins: t.wins,
                losses: t.losses,
                ties: t.ties,
                expected_wins: fixed2(expected),
                over_under: signed2(luck),
            },
            luck,
        });
    }

    rows.sort_by(|a, b| {
        b.luck
            .partial_cmp(&a.luck)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.entry.team.cmp(&b.entry.team))
            .then(a.entry.season.cmp(&b.entry.season))
    });

    let luckiest: Vec<TeamSeasonLuck> = rows
        .iter()
        .take(LEADER_CAP)
        .map(|r| r.entry.clone())
        .collect();
    let unluckiest: Vec<TeamSeasonLuck> = rows
        .iter()
        .rev()
        .take(LEADER_CAP)
        .map(|r| r.entry.clone())
        .collect();

    let consistently_over: Vec<ConsistentTeam> = per_team
        .into_iter()
        .filter(|(_, (tracked, over))| {
            *tracked as usize >= MIN_SEASONS_TRACKED && *over * 2 > *tracked
        })
        .map(|(team, (tracked, over))| ConsistentTeam {
            team: team.to_string(),
            seasons_tracked: tracked,
            seasons_over: over,
        })
        .collect();

    LuckResult {
        luckiest,
        unluckiest,
        consistently_over,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_fixtures::game;

    #[test]
    fn scoreless_season_expects_zero_wins() {
        let games = vec![game(2023, "1", "A", "B", 0, 0)];
        let r = compute_luck(&games);
        let a = r.luckiest.iter().find(|e| e.team == "A").unwrap();
        assert_eq!(a.expected_wins, "0.00");
        assert_eq!(a.over_under, "+0.00");
    }

    #[test]
    fn narrow_wins_look_lucky_blowout_losses_unlucky() {
        let games = vec![
            // A wins twice by 1, then loses by 30: 2-1 with a -28 diff
            game(2023, "1", "A", "B", 21, 20),
            game(2023, "2", "A", "B", 17, 16),
            game(2023, "3", "B", "A", 44, 14),
        ];
        let r = compute_luck(&games);
        let a = r.luckiest.iter().find(|e| e.team == "A").unwrap();
        assert!(a.over_under.starts_with('+'), "A overachieved: {}", a.over_under);
        let b = r.unluckiest.iter().find(|e| e.team == "B").unwrap();
        assert!(b.over_under.starts_with('-'), "B underachieved: {}", b.over_under);
    }

    #[test]
    fn luckiest_is_sorted_descending_by_luck() {
        let games = vec![
            game(2023, "1", "A", "B", 21, 20),
            game(2023, "2", "C", "D", 45, 0),
        ];
        let r = compute_luck(&games);
        let lucks: Vec<f64> = r
            .luckiest
            .iter()
            .map(|e| e.over_under.parse::<f64>().unwrap())
            .collect();
        for w in lucks.windows(2) {
            assert!(w[0] >= w[1]);
        }
    }

    #[test]
    fn consistency_needs_three_seasons_and_a_majority() {
        let mut games = Vec::new();
        // A: three seasons of narrow 1-0 records → positive luck each year
        for season in 2020..2023 {
            games.push(game(season, "1", "A", "B", 21, 20));
        }
        // C: only two lucky seasons → not enough history
        for season in 2021..2023 {
            games.push(game(season, "2", "C", "D", 14, 13));
        }
        let r = compute_luck(&games);
        assert!(r.consistently_over.iter().any(|t| t.team == "A"));
        assert!(!r.consistently_over.iter().any(|t| t.team == "C"));
        let a = r.consistently_over.iter().find(|t| t.team == "A").unwrap();
        assert_eq!(a.seasons_tracked, 3);
        assert_eq!(a.seasons_over, 3);
    }

    #[test]
    fn empty_input_zeroes_everything() {
        let r = compute_luck(&[]);
        assert!(r.luckiest.is_empty());
        assert!(r.unluckiest.is_empty());
        assert!(r.consistently_over.is_empty());
    }
}
