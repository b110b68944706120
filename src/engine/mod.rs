//! Shared building blocks for the report modules.
//!
//! Everything in here is pure and allocation-local: each report invocation
//! folds its own accumulators from scratch and throws them away with the
//! result. No caching, no globals.

pub mod format;
pub mod group;
pub mod measures;
pub mod ranking;
pub mod streak;
