//! Distributional measures over aggregate win/point counts.
//!
//! Pure formulas with guard clauses for degenerate input: none of these ever
//! return NaN or infinity for well-typed arguments.

/// Exponent of the Pythagorean win expectation, the standard NFL fit.
pub const PYTHAGOREAN_EXPONENT: f64 = 2.37;

/// Shannon entropy (bits) of a win distribution.
///
/// Each team's share of total wins is a probability; zero-win teams
/// contribute nothing. A distribution where one team owns every win has
/// entropy 0.
pub fn shannon_entropy(win_counts: &[u32]) -> f64 {
    let total: u64 = win_counts.iter().map(|&w| w as u64).sum();
    if total == 0 {
        return 0.0;
    }
    let mut h = 0.0;
    for &w in win_counts {
        if w > 0 {
            let p = w as f64 / total as f64;
            h -= p * p.log2();
        }
    }
    h
}

/// Normalized entropy in [0, 1]: 1 = perfectly even wins, 0 = one-team
/// domination. Zero for fewer than two teams (no spread to measure).
pub fn parity_index(win_counts: &[u32]) -> f64 {
    let n = win_counts.len();
    if n < 2 {
        return 0.0;
    }
    let max_entropy = (n as f64).log2();
    (shannon_entropy(win_counts) / max_entropy).clamp(0.0, 1.0)
}

/// Gini coefficient of a win distribution: mean absolute pairwise
/// difference over `2 × mean`. 0 = perfect equality; 0 on all-zero input.
pub fn gini(win_counts: &[u32]) -> f64 {
    let n = win_counts.len();
    if n == 0 {
        return 0.0;
    }
    let total: u64 = win_counts.iter().map(|&w| w as u64).sum();
    if total == 0 {
        return 0.0;
    }
    let mean = total as f64 / n as f64;
    let mut abs_diff_sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            abs_diff_sum += (win_counts[i] as f64 - win_counts[j] as f64).abs();
        }
    }
    let mean_abs_diff = abs_diff_sum / (n * n) as f64;
    (mean_abs_diff / (2.0 * mean)).clamp(0.0, 1.0)
}

/// Pythagorean win expectation: `games × PF^e / (PF^e + PA^e)` with
/// e = 2.37. The zero/zero case (no points at all) returns 0.0, not NaN.
pub fn pythagorean_wins(points_for: i64, points_against: i64, games: u32) -> f64 {
    if points_for <= 0 && points_against <= 0 {
        return 0.0;
    }
    let pf = (points_for.max(0) as f64).powf(PYTHAGOREAN_EXPONENT);
    let pa = (points_against.max(0) as f64).powf(PYTHAGOREAN_EXPONENT);
    games as f64 * pf / (pf + pa)
}
