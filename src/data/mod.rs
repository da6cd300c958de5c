pub mod deltas;
pub mod loader;
pub mod types;

pub use deltas::{IndicatorSeries, LevelSeries, FOUR_WEEKS_DAYS};
pub use loader::{LoaderError, SnapshotLoader};
pub use types::{DatedSnapshot, IndicatorField, IndicatorSnapshot, Indicators, SnapshotError};
