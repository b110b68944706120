use serde::{Deserialize, Serialize};

/// Result of a game against the point spread, from the home team's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadResult {
    /// Home side covered the spread
    #[serde(rename = "COVERED", alias = "Covered")]
    Covered,
    /// Home side failed to cover
    #[serde(rename = "LOST", alias = "Lost")]
    Lost,
    /// Landed exactly on the number
    #[serde(rename = "PUSH", alias = "Push")]
    Push,
}

/// Result of a game against the posted total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OuResult {
    #[serde(rename = "OVER", alias = "Over")]
    Over,
    #[serde(rename = "UNDER", alias = "Under")]
    Under,
    #[serde(rename = "PUSH", alias = "Push")]
    Push,
}

/// Which side of the ball a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// A single normalized game row as produced by the ingestion pipeline.
///
/// Field keys mirror the compact exporter format (`s`/`w`/`h`/`a`/…) so the
/// same data file feeds both the dashboards and this engine. Everything past
/// the score columns is an optional facet: older seasons have no betting
/// lines, most rows have no weather or quarter detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Season year (the year the season started)
    #[serde(rename = "s")]
    pub season: i32,
    /// Week label: "1".."18" for regular season, or a playoff round label
    /// such as "WildCard", "Division", "ConfChamp", "SuperBowl"
    #[serde(rename = "w")]
    pub week: String,
    /// Day of week ("Sun", "Mon", ...)
    #[serde(rename = "d", default)]
    pub day: String,
    /// ISO date (YYYY-MM-DD)
    #[serde(rename = "dt", default)]
    pub date: String,
    /// Kickoff time (ET), e.g. "8:20PM"; empty when unknown
    #[serde(rename = "tm", default)]
    pub time: String,
    #[serde(rename = "h")]
    pub home: String,
    #[serde(rename = "a")]
    pub away: String,
    #[serde(rename = "hs")]
    pub home_score: i32,
    #[serde(rename = "as")]
    pub away_score: i32,
    /// Primetime slot label: "MNF" | "TNF" | "SNF" | ""
    #[serde(rename = "pt", default)]
    pub primetime: String,
    /// Closing point spread relative to the home team (negative = home favored)
    #[serde(rename = "sp", default)]
    pub spread: Option<f64>,
    /// Posted over/under total
    #[serde(rename = "ou", default)]
    pub over_under: Option<f64>,
    /// Home-side spread result
    #[serde(rename = "sr", default)]
    pub spread_result: Option<SpreadResult>,
    #[serde(rename = "our", default)]
    pub ou_result: Option<OuResult>,
    #[serde(rename = "po", default)]
    pub playoff: bool,
    /// Kickoff temperature in °F
    #[serde(rename = "tmp", default)]
    pub temperature: Option<f64>,
    #[serde(rename = "wnd", default)]
    pub wind_mph: Option<f64>,
    /// Free-form conditions string ("Snow", "Light Rain", "Clear", ...)
    #[serde(rename = "cond", default)]
    pub conditions: Option<String>,
    /// Per-quarter home scoring; 4 entries plus one per overtime period
    #[serde(rename = "hq", default)]
    pub home_quarters: Option<Vec<i32>>,
    #[serde(rename = "aq", default)]
    pub away_quarters: Option<Vec<i32>>,
}

impl GameRecord {
    pub fn is_tie(&self) -> bool {
        self.home_score == self.away_score
    }

    /// Winning team name, or `None` on a tie.
    pub fn winner(&self) -> Option<&str> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(&self.home),
            std::cmp::Ordering::Less => Some(&self.away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn loser(&self) -> Option<&str> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(&self.away),
            std::cmp::Ordering::Less => Some(&self.home),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Absolute margin of victory (0 on a tie).
    pub fn margin(&self) -> i32 {
        (self.home_score - self.away_score).abs()
    }

    pub fn total_points(&self) -> i32 {
        self.home_score + self.away_score
    }

    /// Numeric week, or `None` for playoff round labels and garbage.
    /// Callers that need numeric weeks skip `None` rows silently.
    pub fn week_number(&self) -> Option<u32> {
        self.week.trim().parse().ok()
    }

    /// Which side `team` played on in this game, if it played at all.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home == team {
            Some(Side::Home)
        } else if self.away == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Points scored and allowed from `team`'s perspective.
    pub fn scored_allowed(&self, side: Side) -> (i32, i32) {
        match side {
            Side::Home => (self.home_score, self.away_score),
            Side::Away => (self.away_score, self.home_score),
        }
    }

    /// Signed result for `team`: `Some(true)` win, `Some(false)` loss,
    /// `None` on a tie or if the team did not play.
    pub fn won_by(&self, team: &str) -> Option<bool> {
        let side = self.side_of(team)?;
        if self.is_tie() {
            return None;
        }
        let (scored, allowed) = self.scored_allowed(side);
        Some(scored > allowed)
    }

    /// Home-side spread result, falling back to deriving it from the
    /// closing line when the exporter stored the line but not the verdict.
    /// Home covers when `home_score + spread` beats the away score.
    pub fn effective_spread_result(&self) -> Option<SpreadResult> {
        if self.spread_result.is_some() {
            return self.spread_result;
        }
        let line = self.spread?;
        let adjusted = self.home_score as f64 + line;
        let away = self.away_score as f64;
        Some(if adjusted > away {
            SpreadResult::Covered
        } else if adjusted < away {
            SpreadResult::Lost
        } else {
            SpreadResult::Push
        })
    }

    /// Over/under result, derived from the posted total when unstored.
    pub fn effective_ou_result(&self) -> Option<OuResult> {
        if self.ou_result.is_some() {
            return self.ou_result;
        }
        let line = self.over_under?;
        let total = self.total_points() as f64;
        Some(if total > line {
            OuResult::Over
        } else if total < line {
            OuResult::Under
        } else {
            OuResult::Push
        })
    }

    /// Sort key for chronological scans: season first, then ISO date,
    /// then numeric week as a fallback for rows without dates.
    pub fn chrono_key(&self) -> (i32, String, u32) {
        (
            self.season,
            self.date.clone(),
            self.week_number().unwrap_or(u32::MAX),
        )
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;

    /// Bare-bones game for tests; facets default to empty/None.
    pub fn game(season: i32, week: &str, home: &str, away: &str, hs: i32, aws: i32) -> GameRecord {
        GameRecord {
            season,
            week: week.into(),
            day: "Sun".into(),
            date: format!("{}-10-{:02}", season, week.parse::<u32>().unwrap_or(1).min(28)),
            time: "1:00PM".into(),
            home: home.into(),
            away: away.into(),
            home_score: hs,
            away_score: aws,
            primetime: String::new(),
            spread: None,
            over_under: None,
            spread_result: None,
            ou_result: None,
            playoff: false,
            temperature: None,
            wind_mph: None,
            conditions: None,
            home_quarters: None,
            away_quarters: None,
        }
    }
}
