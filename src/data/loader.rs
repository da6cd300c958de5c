//! Indicator history loader.
//!
//! Reads dated snapshots from the files the ingestion jobs export:
//! - JSON: a single snapshot object or an array of them
//! - Parquet: a `date` column (YYYY-MM-DD) plus one nullable numeric
//!   column per wire field name (`walcl`, `dWalcl_4w`, `hyOAS`, ...)
//!
//! Columns absent from a Parquet file load as `None` for that field.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use super::types::{DatedSnapshot, IndicatorField, IndicatorSnapshot};

/// Name of the date column in Parquet history files.
pub const DATE_COLUMN: &str = "date";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Many(Vec<DatedSnapshot>),
    One(DatedSnapshot),
}

/// Loader for one indicator history file.
pub struct SnapshotLoader {
    path: PathBuf,
}

impl SnapshotLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file, picking the format from its extension.
    ///
    /// Snapshots come back sorted by date, one per date.
    pub fn load(&self) -> Result<Vec<DatedSnapshot>, LoaderError> {
        let extension = self
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        let snapshots = match extension.as_str() {
            "json" => self.load_json()?,
            "parquet" => self.load_parquet()?,
            _ => {
                return Err(LoaderError::UnsupportedFormat(
                    self.path.display().to_string(),
                ))
            }
        };

        let snapshots = sort_and_dedup(snapshots);
        info!(
            "Loaded {} snapshots from {}",
            snapshots.len(),
            self.path.display()
        );
        Ok(snapshots)
    }

    /// Most recent snapshot in the file.
    pub fn latest(&self) -> Result<DatedSnapshot, LoaderError> {
        self.load()?.pop().ok_or_else(|| {
            LoaderError::InvalidData(format!("No snapshots in {}", self.path.display()))
        })
    }

    /// Read a JSON history file without sorting.
    pub fn load_json(&self) -> Result<Vec<DatedSnapshot>, LoaderError> {
        self.ensure_exists()?;
        let content = fs::read_to_string(&self.path)?;
        let document: JsonDocument = serde_json::from_str(&content)?;
        Ok(match document {
            JsonDocument::Many(snapshots) => snapshots,
            JsonDocument::One(snapshot) => vec![snapshot],
        })
    }

    /// Read a Parquet history file without sorting.
    pub fn load_parquet(&self) -> Result<Vec<DatedSnapshot>, LoaderError> {
        self.ensure_exists()?;
        let lf = LazyFrame::scan_parquet(&self.path, ScanArgsParquet::default())?;
        let df = lf.collect()?;
        dataframe_to_snapshots(&df)
    }

    fn ensure_exists(&self) -> Result<(), LoaderError> {
        if self.path.exists() {
            Ok(())
        } else {
            Err(LoaderError::FileNotFound(self.path.display().to_string()))
        }
    }
}

/// Convert a history DataFrame (one row per date) into snapshots.
fn dataframe_to_snapshots(df: &DataFrame) -> Result<Vec<DatedSnapshot>, LoaderError> {
    let height = df.height();

    let dates_col = df.column(DATE_COLUMN)?.cast(&DataType::String)?;
    let dates = dates_col.str()?;

    let mut snapshots = Vec::with_capacity(height);
    for (idx, raw) in dates.into_iter().enumerate() {
        let date = raw
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .ok_or_else(|| {
                LoaderError::InvalidData(format!("Row {} has an invalid date: {:?}", idx, raw))
            })?;
        snapshots.push(DatedSnapshot::new(date, IndicatorSnapshot::default()));
    }

    for field in IndicatorField::ALL {
        let Ok(column) = df.column(field.wire_name()) else {
            continue;
        };
        let column = column.cast(&DataType::Float64)?;
        let values = column.f64()?;
        for (snapshot, value) in snapshots.iter_mut().zip(values.into_iter()) {
            snapshot.snapshot.set(field, value);
        }
    }

    Ok(snapshots)
}

/// Sort ascending by date, keeping the last row seen for a repeated date.
fn sort_and_dedup(mut snapshots: Vec<DatedSnapshot>) -> Vec<DatedSnapshot> {
    snapshots.sort_by_key(|s| s.date);

    let mut out: Vec<DatedSnapshot> = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        match out.last_mut() {
            Some(prev) if prev.date == snapshot.date => {
                warn!("Duplicate snapshot for {}, keeping the later row", snapshot.date);
                *prev = snapshot;
            }
            _ => out.push(snapshot),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn temp_with(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file() {
        let loader = SnapshotLoader::new("does/not/exist.json");
        assert!(matches!(loader.load(), Err(LoaderError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = temp_with(".csv", "date,walcl\n");
        let loader = SnapshotLoader::new(file.path());
        assert!(matches!(loader.load(), Err(LoaderError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_single_json_object() {
        let file = temp_with(".json", r#"{"date": "2024-05-01", "vix": 13.2}"#);
        let snapshots = SnapshotLoader::new(file.path()).load().unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].snapshot.vix, Some(13.2));
    }

    #[test]
    fn test_load_json_sorts_and_dedups() {
        let file = temp_with(
            ".json",
            r#"[
                {"date": "2024-05-08", "vix": 15.0},
                {"date": "2024-05-01", "vix": 13.0},
                {"date": "2024-05-08", "vix": 16.0}
            ]"#,
        );
        let loader = SnapshotLoader::new(file.path());
        let snapshots = loader.load().unwrap();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].date, d(2024, 5, 1));
        assert_eq!(snapshots[1].snapshot.vix, Some(16.0));

        let latest = loader.latest().unwrap();
        assert_eq!(latest.date, d(2024, 5, 8));
    }

    #[test]
    fn test_latest_of_empty_file() {
        let file = temp_with(".json", "[]");
        let loader = SnapshotLoader::new(file.path());
        assert!(matches!(loader.latest(), Err(LoaderError::InvalidData(_))));
    }

    #[test]
    fn test_malformed_json() {
        let file = temp_with(".json", "{not json");
        let loader = SnapshotLoader::new(file.path());
        assert!(matches!(loader.load(), Err(LoaderError::Json(_))));
    }

    #[test]
    fn test_load_parquet() {
        let mut df = df!(
            "date" => ["2024-01-10", "2024-01-03"],
            "walcl" => [Some(7_600_000.0), None::<f64>],
            "dWalcl_4w" => [Some(-12_000.0), Some(3_000.0)],
            "vix" => [14.0, 15.5],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        {
            let mut out = std::fs::File::create(file.path()).unwrap();
            ParquetWriter::new(&mut out).finish(&mut df).unwrap();
        }

        let snapshots = SnapshotLoader::new(file.path()).load().unwrap();
        assert_eq!(snapshots.len(), 2);

        assert_eq!(snapshots[0].date, d(2024, 1, 3));
        assert_eq!(snapshots[0].snapshot.walcl, None);
        assert_eq!(snapshots[0].snapshot.d_walcl_4w, Some(3_000.0));

        assert_eq!(snapshots[1].snapshot.walcl, Some(7_600_000.0));
        assert_eq!(snapshots[1].snapshot.vix, Some(14.0));
        // Column not in the file
        assert_eq!(snapshots[1].snapshot.hy_oas, None);
    }

    #[test]
    fn test_sort_and_dedup_keeps_last() {
        let mut a = IndicatorSnapshot::default();
        a.vix = Some(1.0);
        let mut b = IndicatorSnapshot::default();
        b.vix = Some(2.0);

        let out = sort_and_dedup(vec![
            DatedSnapshot::new(d(2024, 1, 2), a.clone()),
            DatedSnapshot::new(d(2024, 1, 1), a),
            DatedSnapshot::new(d(2024, 1, 2), b),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].snapshot.vix, Some(2.0));
    }
}
