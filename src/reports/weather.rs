//! Weather splits: scoring and home results by temperature, wind, and
//! conditions buckets.
//!
//! Rows missing the relevant facet are skipped — most historical seasons
//! carry no weather detail at all. Rates here render zero decisions as
//! `"0.000"`.

use serde::Serialize;

use crate::engine::format::{avg1, RATE_ZERO};
use crate::engine::group::fold_by_key;
use crate::model::GameRecord;

/// Games a bucket needs before it can be named best/worst.
const MIN_BUCKET_GAMES: u32 = 5;

/// Temperature bands in °F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TempBucket {
    Freezing, // < 32
    Cold,     // 32–49
    Mild,     // 50–69
    Warm,     // >= 70
}

impl TempBucket {
    fn of(temp: f64) -> Self {
        if temp < 32.0 {
            TempBucket::Freezing
        } else if temp < 50.0 {
            TempBucket::Cold
        } else if temp < 70.0 {
            TempBucket::Mild
        } else {
            TempBucket::Warm
        }
    }

    fn label(self) -> &'static str {
        match self {
            TempBucket::Freezing => "freezing",
            TempBucket::Cold => "cold",
            TempBucket::Mild => "mild",
            TempBucket::Warm => "warm",
        }
    }
}

/// Wind threshold (mph) above which a game counts as windy.
const WINDY_MPH: f64 = 15.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherBucket {
    pub bucket: String,
    pub games: u32,
    pub avg_total_points: String,
    pub home_win_pct: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    pub by_temperature: Vec<WeatherBucket>,
    pub by_wind: Vec<WeatherBucket>,
    pub by_conditions: Vec<WeatherBucket>,
    /// Bucket with the highest scoring average (≥ 5 games).
    pub highest_scoring: Option<WeatherBucket>,
    pub lowest_scoring: Option<WeatherBucket>,
    /// Rows that carried any weather facet at all.
    pub games_with_weather: u32,
}

pub fn compute_weather(games: &[GameRecord]) -> WeatherResult {
    let by_temperature = bucketize(games, |g| {
        g.temperature.map(|t| TempBucket::of(t).label().to_string())
    });
    let by_wind = bucketize(games, |g| {
        g.wind_mph
            .map(|w| if w >= WINDY_MPH { "windy" } else { "calm" }.to_string())
    });
    let by_conditions = bucketize(games, |g| {
        g.conditions.as_deref().map(condition_bucket)
    });

    let games_with_weather = games
        .iter()
        .filter(|g| g.temperature.is_some() || g.wind_mph.is_some() || g.conditions.is_some())
        .count() as u32;

    // Sort on the numeric average; the formatted string is display-only.
    let mut scored: Vec<(f64, &WeatherBucket)> = by_temperature
        .iter()
        .chain(&by_wind)
        .chain(&by_conditions)
        .filter(|b| b.games >= MIN_BUCKET_GAMES)
        .map(|b| (b.avg_total_points.parse::<f64>().unwrap_or(0.0), b))
        .collect();
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.bucket.cmp(&b.1.bucket))
    });
    let highest_scoring = scored.first().map(|(_, b)| (*b).clone());
    let lowest_scoring = scored.last().map(|(_, b)| (*b).clone());

    WeatherResult {
        by_temperature,
        by_wind,
        by_conditions,
        highest_scoring,
        lowest_scoring,
        games_with_weather,
    }
}

fn bucketize<F>(games: &[GameRecord], key_fn: F) -> Vec<WeatherBucket>
where
    F: FnMut(&GameRecord) -> Option<String>,
{
    // The keyed fold records each row from the home perspective, so bucket
    // wins are home wins and for+against per bucket is the game total.
    let totals = fold_by_key(games, key_fn);
    totals
        .into_iter()
        .map(|(bucket, t)| WeatherBucket {
            bucket,
            games: t.games,
            avg_total_points: avg1(t.points_for + t.points_against, t.games),
            home_win_pct: RATE_ZERO.rate(t.wins, t.decisions()),
        })
        .collect()
}

fn condition_bucket(cond: &str) -> String {
    let c = cond.to_ascii_lowercase();
    if c.contains("snow") {
        "snow".to_string()
    } else if c.contains("rain") || c.contains("shower") {
        "rain".to_string()
    } else {
        "clear".to_string()
    }
}
