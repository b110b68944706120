//! Margin-of-victory distribution.
//!
//! Decisive games land in one of five margin buckets; ties are counted
//! separately and never enter a bucket. Bucket counts sum to the number of
//! decisive games and the percentage column sums to 100 within rounding.

use serde::Serialize;

use crate::engine::format::pct1;
use crate::model::GameRecord;

const BLOWOUT_CAP: usize = 10;

/// Bucket bounds (inclusive), label order preserved in output.
const BUCKETS: [(i32, i32, &str); 5] = [
    (1, 3, "1-3"),
    (4, 7, "4-7"),
    (8, 14, "8-14"),
    (15, 24, "15-24"),
    (25, i32::MAX, "25+"),
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginBucket {
    pub range: String,
    pub count: u32,
    /// Share of decisive games, one decimal.
    pub pct: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blowout {
    pub season: i32,
    pub week: String,
    pub winner: String,
    pub loser: String,
    pub margin: i32,
    pub score: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginsResult {
    pub buckets: Vec<MarginBucket>,
    pub decisive_games: u32,
    pub ties: u32,
    pub avg_margin: String,
    pub biggest_blowouts: Vec<Blowout>,
}

pub fn compute_margins(games: &[GameRecord]) -> MarginsResult {
    let mut counts = [0u32; BUCKETS.len()];
    let mut ties = 0u32;
    let mut margin_sum = 0i64;
    let mut decisive = 0u32;
    let mut blowouts: Vec<Blowout> = Vec::new();

    for g in games {
        let margin = g.margin();
        if margin == 0 {
            ties += 1;
            continue;
        }
        decisive += 1;
        margin_sum += margin as i64;
        for (i, (lo, hi, _)) in BUCKETS.iter().enumerate() {
            if margin >= *lo && margin <= *hi {
                counts[i] += 1;
                break;
            }
        }
        if let (Some(winner), Some(loser)) = (g.winner(), g.loser()) {
            blowouts.push(Blowout {
                season: g.season,
                week: g.week.clone(),
                winner: winner.to_string(),
                loser: loser.to_string(),
                margin,
                score: format!(
                    "{}-{}",
                    g.home_score.max(g.away_score),
                    g.home_score.min(g.away_score)
                ),
            });
        }
    }

    blowouts.sort_by(|a, b| {
        b.margin
            .cmp(&a.margin)
            .then(a.season.cmp(&b.season))
            .then(a.winner.cmp(&b.winner))
    });
    blowouts.truncate(BLOWOUT_CAP);

    let buckets = BUCKETS
        .iter()
        .enumerate()
        .map(|(i, (_, _, label))| MarginBucket {
            range: label.to_string(),
            count: counts[i],
            pct: pct1(counts[i], decisive),
        })
        .collect();

    let avg_margin = if decisive == 0 {
        "0.0".to_string()
    } else {
        format!("{:.1}", margin_sum as f64 / decisive as f64)
    };

    MarginsResult {
        buckets,
        decisive_games: decisive,
        ties,
        avg_margin,
        biggest_blowouts: blowouts,
    }
}
