//! Comeback wins: games where the winner trailed and came back.
//!
//! With quarter scores present the deficit is the largest trailing margin
//! the eventual winner faced at any quarter boundary. Without quarter data
//! a final margin of at most one score (7 points) proxies a comeback, with
//! the final margin standing in for the deficit; bigger margins are treated
//! as wire-to-wire wins and excluded.

use serde::Serialize;

use crate::model::GameRecord;

/// Final margin at or below this counts as a comeback when no quarter
/// detail is available.
const ONE_SCORE_MARGIN: i32 = 7;
const BIGGEST_CAP: usize = 10;
const TEAM_LEADER_CAP: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComebackGame {
    pub season: i32,
    pub week: String,
    pub winner: String,
    pub loser: String,
    pub winner_score: i32,
    pub loser_score: i32,
    /// Largest margin the winner trailed by.
    pub deficit: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComebackStats {
    pub total_comebacks: u32,
    /// Top comebacks by deficit descending; a strict prefix of the full
    /// sorted list.
    pub biggest_comebacks: Vec<ComebackGame>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamComebacks {
    pub team: String,
    pub comebacks: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComebacksResult {
    pub stats: ComebackStats,
    pub team_leaders: Vec<TeamComebacks>,
}

pub fn compute_comebacks(games: &[GameRecord]) -> ComebacksResult {
    let mut comebacks: Vec<ComebackGame> = Vec::new();

    for g in games {
        let (winner, loser) = match (g.winner(), g.loser()) {
            (Some(w), Some(l)) => (w, l),
            _ => continue, // ties cannot be comebacks
        };
        let Some(deficit) = comeback_deficit(g) else {
            continue;
        };
        let (winner_score, loser_score) = if g.home_score > g.away_score {
            (g.home_score, g.away_score)
        } else {
            (g.away_score, g.home_score)
        };
        comebacks.push(ComebackGame {
            season: g.season,
            week: g.week.clone(),
            winner: winner.to_string(),
            loser: loser.to_string(),
            winner_score,
            loser_score,
            deficit,
        });
    }

    let total_comebacks = comebacks.len() as u32;

    let mut counts: std::collections::BTreeMap<&str, u32> = std::collections::BTreeMap::new();
    for c in &comebacks {
        *counts.entry(c.winner.as_str()).or_default() += 1;
    }
    let mut team_leaders: Vec<TeamComebacks> = counts
        .into_iter()
        .map(|(team, comebacks)| TeamComebacks {
            team: team.to_string(),
            comebacks,
        })
        .collect();
    team_leaders.sort_by(|a, b| b.comebacks.cmp(&a.comebacks).then(a.team.cmp(&b.team)));
    team_leaders.truncate(TEAM_LEADER_CAP);

    comebacks.sort_by(|a, b| {
        b.deficit
            .cmp(&a.deficit)
            .then(a.season.cmp(&b.season))
            .then(a.winner.cmp(&b.winner))
    });
    comebacks.truncate(BIGGEST_CAP);

    ComebacksResult {
        stats: ComebackStats {
            total_comebacks,
            biggest_comebacks: comebacks,
        },
        team_leaders,
    }
}

/// Deficit the winner overcame, or `None` for a non-comeback win.
fn comeback_deficit(g: &GameRecord) -> Option<i32> {
    if let (Some(hq), Some(aq)) = (&g.home_quarters, &g.away_quarters) {
        if !hq.is_empty() && hq.len() == aq.len() {
            return quarter_deficit(g, hq, aq);
        }
    }
    // No quarter detail: a one-score final margin proxies a comeback.
    let margin = g.margin();
    (margin > 0 && margin <= ONE_SCORE_MARGIN).then_some(margin)
}

/// Largest trailing margin the winner faced at any quarter boundary
/// (final boundary excluded — the winner leads there by definition).
fn quarter_deficit(g: &GameRecord, hq: &[i32], aq: &[i32]) -> Option<i32> {
    let home_won = g.home_score > g.away_score;
    let mut home_cum = 0;
    let mut away_cum = 0;
    let mut worst = 0;
    for (h, a) in hq.iter().zip(aq).take(hq.len() - 1) {
        home_cum += h;
        away_cum += a;
        let winner_deficit = if home_won {
            away_cum - home_cum
        } else {
            home_cum - away_cum
        };
        worst = worst.max(winner_deficit);
    }
    (worst > 0).then_some(worst)
}
