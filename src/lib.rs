//! Gridiron Trends: a pure statistical aggregation engine for historical
//! NFL game records.
//!
//! The library is a family of stateless report functions over in-memory
//! `GameRecord` slices. Every entry point is synchronous, does no I/O, and
//! rebuilds its aggregates from scratch per call, so any number of reports
//! can run concurrently over the same data without coordination.

pub mod engine;
pub mod ingest;
pub mod model;
pub mod reports;

pub use model::GameRecord;
