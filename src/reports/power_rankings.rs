//! Composite power rankings over the supplied game slice.
//!
//! Thin wrapper over the ranking engine: threshold first, full sort, dense
//! 1-based ranks, then the top-N cut. The zero-decision sentinel for this
//! report family is `"0.000"`.

use serde::Serialize;

use crate::engine::format::{fixed3, RATE_ZERO};
use crate::engine::ranking::compute_power_scores;
use crate::model::GameRecord;

/// Teams below this many decisive games never enter the ranking.
const MIN_DECISIONS: u32 = 4;
const TOP_CAP: usize = 20;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRow {
    /// Dense 1-based rank, assigned after the full sort.
    pub rank: u32,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub composite_score: String,
    pub win_pct: String,
    pub strength_of_schedule: String,
    pub point_diff: i64,
    pub recent_form: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerRankingsResult {
    pub rankings: Vec<RankingRow>,
    pub teams_ranked: u32,
    pub teams_below_threshold: u32,
}

pub fn compute_power_rankings(games: &[GameRecord]) -> PowerRankingsResult {
    let scores = compute_power_scores(games, MIN_DECISIONS);
    let teams_ranked = scores.len() as u32;

    let total_teams = {
        let mut names: Vec<&str> = games
            .iter()
            .flat_map(|g| [g.home.as_str(), g.away.as_str()])
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len() as u32
    };

    let rankings = scores
        .into_iter()
        .take(TOP_CAP)
        .enumerate()
        .map(|(i, s)| RankingRow {
            rank: i as u32 + 1,
            team: s.team,
            wins: s.wins,
            losses: s.losses,
            composite_score: fixed3(s.composite),
            win_pct: RATE_ZERO.value(s.win_pct, s.decisions > 0),
            strength_of_schedule: fixed3(s.sos),
            point_diff: s.point_diff,
            recent_form: fixed3(s.recent_form),
        })
        .collect();

    PowerRankingsResult {
        rankings,
        teams_ranked,
        teams_below_threshold: total_teams.saturating_sub(teams_ranked),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_fixtures::game;

    fn league() -> Vec<GameRecord> {
        let mut games = Vec::new();
        // Four teams play a double round robin; A dominates, D loses out.
        let results = [
            ("A", "B", 27, 17),
            ("A", "C", 30, 13),
            ("A", "D", 41, 7),
            ("B", "C", 24, 20),
            ("B", "D", 21, 10),
            ("C", "D", 20, 14),
            ("B", "A", 13, 23),
            ("C", "A", 16, 19),
            ("D", "A", 3, 38),
            ("C", "B", 17, 27),
            ("D", "B", 14, 24),
            ("D", "C", 10, 16),
        ];
        for (w, (h, a, hs, aws)) in results.iter().enumerate() {
            games.push(game(2023, &(w + 1).to_string(), h, a, *hs, *aws));
        }
        games
    }

    #[test]
    fn ranks_are_dense_and_one_based() {
        let r = compute_power_rankings(&league());
        let ranks: Vec<u32> = r.rankings.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, (1..=ranks.len() as u32).collect::<Vec<_>>());
        assert_eq!(r.rankings[0].team, "A");
        assert_eq!(r.rankings.last().unwrap().team, "D");
    }

    #[test]
    fn formatted_components_have_fixed_precision() {
        let r = compute_power_rankings(&league());
        let top = &r.rankings[0];
        assert_eq!(top.win_pct, "1.000");
        assert_eq!(top.composite_score.split('.').nth(1).unwrap().len(), 3);
        assert_eq!(top.recent_form.split('.').nth(1).unwrap().len(), 3);
    }

    #[test]
    fn threshold_keeps_small_samples_out() {
        let mut games = league();
        games.push(game(2023, "13", "E", "D", 45, 0));
        let r = compute_power_rankings(&games);
        assert!(r.rankings.iter().all(|row| row.team != "E"));
        assert_eq!(r.teams_below_threshold, 1);
    }

    #[test]
    fn top_list_is_a_prefix_of_the_full_sort() {
        let r = compute_power_rankings(&league());
        assert!(r.rankings.len() <= 20);
        let composites: Vec<String> = r
            .rankings
            .iter()
            .map(|row| row.composite_score.clone())
            .collect();
        let mut sorted = composites.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        // 3-decimal strings with equal width sort like the numbers
        assert_eq!(composites, sorted);
    }

    #[test]
    fn empty_input_yields_empty_but_populated_result() {
        let r = compute_power_rankings(&[]);
        assert!(r.rankings.is_empty());
        assert_eq!(r.teams_ranked, 0);
        assert_eq!(r.teams_below_threshold, 0);
    }
}
