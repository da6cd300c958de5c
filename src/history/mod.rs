//! Scenario history module.
//!
//! Replays classification over an indicator history:
//! - Per-scenario day counts and share of the history
//! - Scenario transitions between consecutive dates
//! - Current streak

pub mod analyzer;

pub use analyzer::{HistoryAnalyzer, HistoryReport, ScenarioStats, SkippedSnapshot, Transition};
