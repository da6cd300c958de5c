pub mod config;
pub mod data;
pub mod glossary;
pub mod history;
pub mod regime;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use data::{DatedSnapshot, IndicatorField, IndicatorSeries, IndicatorSnapshot, Indicators, LevelSeries, LoaderError, SnapshotError, SnapshotLoader};
pub use history::{HistoryAnalyzer, HistoryReport};
pub use regime::{can_show_bullish, derive_scenario, DisplayColor, ScenarioClassifier, ScenarioState, ScenarioThresholds};
