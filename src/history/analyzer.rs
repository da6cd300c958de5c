//! Scenario history analysis.
//!
//! Replays the classifier over a dated indicator history. Each snapshot is
//! stamped with its own observation date, so a replay is reproducible.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::data::DatedSnapshot;
use crate::regime::{ScenarioClassifier, ScenarioState, ScenarioThresholds, Scenario};

/// Snapshot that failed validation during a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSnapshot {
    pub date: NaiveDate,
    pub reason: String,
}

/// Statistics for one scenario across the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioStats {
    pub scenario: Scenario,
    pub days: usize,
    pub pct_of_total: f64,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
}

/// Change of scenario between two consecutive classified dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub date: NaiveDate,
    pub from: Scenario,
    pub to: Scenario,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryReport {
    pub entries: Vec<ScenarioState>,
    pub skipped: Vec<SkippedSnapshot>,
    pub scenario_stats: BTreeMap<Scenario, ScenarioStats>,
    pub transitions: Vec<Transition>,
}

impl HistoryReport {
    pub fn latest(&self) -> Option<&ScenarioState> {
        self.entries.last()
    }

    /// Scenario of the latest entry, the date it started and how many
    /// consecutive entries it has held.
    pub fn current_streak(&self) -> Option<(Scenario, NaiveDate, usize)> {
        let latest = self.entries.last()?;
        let mut start = latest.date;
        let mut length = 0;
        for state in self.entries.iter().rev() {
            if state.scenario != latest.scenario {
                break;
            }
            start = state.date;
            length += 1;
        }
        Some((latest.scenario, start, length))
    }

    pub fn summary(&self) -> String {
        let total = self.entries.len() + self.skipped.len();
        let mut parts: Vec<String> = self
            .scenario_stats
            .values()
            .map(|s| format!("{} {:.1}%", s.scenario.as_str(), s.pct_of_total))
            .collect();
        if parts.is_empty() {
            parts.push("none".to_string());
        }
        format!(
            "{} snapshots ({} classified, {} skipped), {} transitions: {}",
            total,
            self.entries.len(),
            self.skipped.len(),
            self.transitions.len(),
            parts.join(", ")
        )
    }
}

/// Classifies a dated history and aggregates the results.
pub struct HistoryAnalyzer {
    classifier: ScenarioClassifier,
}

impl HistoryAnalyzer {
    pub fn new(thresholds: ScenarioThresholds) -> Self {
        Self {
            classifier: ScenarioClassifier::new(thresholds),
        }
    }

    /// Analyze snapshots given in date order.
    ///
    /// Snapshots that fail validation are listed in `skipped`.
    pub fn analyze(&self, snapshots: &[DatedSnapshot]) -> HistoryReport {
        let results: Vec<_> = snapshots
            .par_iter()
            .map(|s| (s.date, self.classifier.classify(&s.snapshot, s.date)))
            .collect();

        let mut report = HistoryReport::default();
        for (date, result) in results {
            match result {
                Ok(state) => report.entries.push(state),
                Err(e) => {
                    warn!("Skipping snapshot for {}: {}", date, e);
                    report.skipped.push(SkippedSnapshot {
                        date,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.transitions = transitions(&report.entries);
        report.scenario_stats = scenario_stats(&report.entries);

        info!("Analyzed history: {}", report.summary());
        report
    }
}

impl Default for HistoryAnalyzer {
    fn default() -> Self {
        Self::new(ScenarioThresholds::default())
    }
}

fn transitions(entries: &[ScenarioState]) -> Vec<Transition> {
    entries
        .windows(2)
        .filter(|w| w[0].scenario != w[1].scenario)
        .map(|w| Transition {
            date: w[1].date,
            from: w[0].scenario,
            to: w[1].scenario,
        })
        .collect()
}

fn scenario_stats(entries: &[ScenarioState]) -> BTreeMap<Scenario, ScenarioStats> {
    let mut stats: BTreeMap<Scenario, ScenarioStats> = BTreeMap::new();

    for state in entries {
        let entry = stats.entry(state.scenario).or_insert_with(|| ScenarioStats {
            scenario: state.scenario,
            days: 0,
            pct_of_total: 0.0,
            first_seen: state.date,
            last_seen: state.date,
        });
        entry.days += 1;
        entry.first_seen = entry.first_seen.min(state.date);
        entry.last_seen = entry.last_seen.max(state.date);
    }

    let total = entries.len();
    for entry in stats.values_mut() {
        entry.pct_of_total = entry.days as f64 / total as f64 * 100.0;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::fixtures::calm_snapshot;
    use crate::data::IndicatorSnapshot;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn neutral(day: u32) -> DatedSnapshot {
        DatedSnapshot::new(d(day), calm_snapshot())
    }

    fn qt(day: u32) -> DatedSnapshot {
        DatedSnapshot::new(
            d(day),
            IndicatorSnapshot {
                d_walcl_4w: Some(-60_000.0),
                d_wresbal_4w: Some(-40.0),
                ..calm_snapshot()
            },
        )
    }

    fn broken(day: u32) -> DatedSnapshot {
        DatedSnapshot::new(
            d(day),
            IndicatorSnapshot {
                vix: None,
                ..calm_snapshot()
            },
        )
    }

    #[test]
    fn test_empty_history() {
        let report = HistoryAnalyzer::default().analyze(&[]);
        assert!(report.latest().is_none());
        assert!(report.current_streak().is_none());
        assert!(report.scenario_stats.is_empty());
        assert_eq!(
            report.summary(),
            "0 snapshots (0 classified, 0 skipped), 0 transitions: none"
        );
    }

    #[test]
    fn test_entries_keep_input_order_and_dates() {
        let history: Vec<_> = (1..=10).map(neutral).collect();
        let report = HistoryAnalyzer::default().analyze(&history);

        assert_eq!(report.entries.len(), 10);
        for (i, state) in report.entries.iter().enumerate() {
            assert_eq!(state.date, d(i as u32 + 1));
        }
    }

    #[test]
    fn test_stats_and_transitions() {
        let history = vec![neutral(1), neutral(2), qt(3), qt(4), qt(5), neutral(6)];
        let report = HistoryAnalyzer::default().analyze(&history);

        let qt_stats = &report.scenario_stats[&Scenario::Qt];
        assert_eq!(qt_stats.days, 3);
        assert!((qt_stats.pct_of_total - 50.0).abs() < 1e-9);
        assert_eq!(qt_stats.first_seen, d(3));
        assert_eq!(qt_stats.last_seen, d(5));

        assert_eq!(
            report.transitions,
            vec![
                Transition { date: d(3), from: Scenario::Neutral, to: Scenario::Qt },
                Transition { date: d(6), from: Scenario::Qt, to: Scenario::Neutral },
            ]
        );
        assert_eq!(report.current_streak(), Some((Scenario::Neutral, d(6), 1)));
    }

    #[test]
    fn test_invalid_snapshots_are_skipped() {
        let history = vec![qt(1), broken(2), qt(3)];
        let report = HistoryAnalyzer::default().analyze(&history);

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].date, d(2));
        assert!(report.skipped[0].reason.contains("vix"));
        // Skipped rows do not create transitions
        assert!(report.transitions.is_empty());
        assert_eq!(report.current_streak(), Some((Scenario::Qt, d(1), 2)));
    }

    #[test]
    fn test_summary() {
        let history = vec![neutral(1), qt(2), broken(3)];
        let report = HistoryAnalyzer::default().analyze(&history);
        assert_eq!(
            report.summary(),
            "3 snapshots (2 classified, 1 skipped), 1 transitions: neutral 50.0%, qt 50.0%"
        );
    }
}
