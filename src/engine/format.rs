//! Fixed-precision presentation formatting.
//!
//! The dashboards string-match on exact formats, so precision and the
//! zero-decision sentinel are part of each report's output contract. Two
//! sentinel spellings exist in the wild — `".000"` and `"0.000"` — and each
//! report keeps the one it always had (flagged as a product decision, not
//! unified here).

/// Three-decimal rate formatter with a report-chosen zero-decision sentinel.
#[derive(Debug, Clone, Copy)]
pub struct Rate3 {
    sentinel: &'static str,
}

/// Reports whose zero-decision rate renders as `".000"`.
pub const RATE_BARE: Rate3 = Rate3 { sentinel: ".000" };
/// Reports whose zero-decision rate renders as `"0.000"`.
pub const RATE_ZERO: Rate3 = Rate3 { sentinel: "0.000" };

impl Rate3 {
    /// `made / attempts` to three decimals, e.g. `"0.667"`; the sentinel
    /// when there are no attempts.
    pub fn rate(&self, made: u32, attempts: u32) -> String {
        if attempts == 0 {
            self.sentinel.to_string()
        } else {
            format!("{:.3}", made as f64 / attempts as f64)
        }
    }

    /// Format an already-computed fraction.
    pub fn value(&self, fraction: f64, has_data: bool) -> String {
        if has_data {
            format!("{:.3}", fraction)
        } else {
            self.sentinel.to_string()
        }
    }
}

/// Per-game average to one decimal, e.g. `"42.0"`; `"0.0"` on zero games.
pub fn avg1(total: i64, games: u32) -> String {
    if games == 0 {
        "0.0".to_string()
    } else {
        format!("{:.1}", total as f64 / games as f64)
    }
}

/// Two decimals, used by expected-wins style metrics, e.g. `"9.74"`.
pub fn fixed2(x: f64) -> String {
    format!("{:.2}", x)
}

/// Three decimals for indices already in [0, 1], e.g. parity.
pub fn fixed3(x: f64) -> String {
    format!("{:.3}", x)
}

/// Share of a whole as a one-decimal percentage string, e.g. `"37.5"`.
/// `"0.0"` when the whole is empty.
pub fn pct1(part: u32, whole: u32) -> String {
    if whole == 0 {
        "0.0".to_string()
    } else {
        format!("{:.1}", part as f64 * 100.0 / whole as f64)
    }
}

/// Signed two-decimal string with an explicit plus for positives, e.g.
/// `"+1.26"` / `"-0.40"`. Used for luck (actual minus expected wins).
pub fn signed2(x: f64) -> String {
    if x >= 0.0 {
        format!("+{:.2}", x)
    } else {
        format!("{:.2}", x)
    }
}
