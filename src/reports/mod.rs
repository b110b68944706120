//! Dashboard report modules.
//!
//! One module per report, one entry point per module:
//! `compute_<x>(games: &[GameRecord]) -> <X>Result`. Every result is a plain
//! serde-serializable record of records with camelCase field names and
//! dashboard-exact string formatting. Empty input always yields a fully
//! populated zero/empty result, never an error or a null.
//!
//! All entry points expect the chronologically sorted, deduplicated rows the
//! ingest layer produces.

pub mod betting;
pub mod comebacks;
pub mod home_field;
pub mod luck;
pub mod margins;
pub mod momentum;
pub mod parity;
pub mod power_rankings;
pub mod primetime;
pub mod rivalry;
pub mod streaks;
pub mod weather;
