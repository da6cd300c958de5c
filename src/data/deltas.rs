//! Level series and 4-week delta derivation.
//!
//! Upstream series arrive at mixed frequencies (WALCL and WRESBAL are
//! weekly, SOFR and VIX daily). Values are carried forward from the
//! latest observation on or before the requested date.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use super::types::{IndicatorField, IndicatorSnapshot};

/// Trailing window used for every `*_4w` delta.
pub const FOUR_WEEKS_DAYS: i64 = 28;

/// Observations of a single metric, keyed by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelSeries {
    points: BTreeMap<NaiveDate, f64>,
}

impl LevelSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation. Non-finite values are dropped.
    pub fn insert(&mut self, date: NaiveDate, value: f64) {
        if value.is_finite() {
            self.points.insert(date, value);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Latest observation on or before `date`.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.points.range(..=date).next_back().map(|(_, v)| *v)
    }

    /// Change between `date` and `date - window_days`.
    pub fn delta_over(&self, date: NaiveDate, window_days: i64) -> Option<f64> {
        let current = self.value_at(date)?;
        let past = self.value_at(date - Duration::days(window_days))?;
        Some(current - past)
    }

    pub fn delta_4w(&self, date: NaiveDate) -> Option<f64> {
        self.delta_over(date, FOUR_WEEKS_DAYS)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.keys().next_back().copied()
    }
}

impl FromIterator<(NaiveDate, f64)> for LevelSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (date, value) in iter {
            series.insert(date, value);
        }
        series
    }
}

/// Raw level series for every metric feeding a snapshot.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSeries {
    pub walcl: LevelSeries,
    pub wresbal: LevelSeries,
    pub rrpon: LevelSeries,
    pub sofr: LevelSeries,
    pub iorb: LevelSeries,
    pub vix: LevelSeries,
    pub hy_oas: LevelSeries,
    pub t10y3m: LevelSeries,
    pub dxy_broad: LevelSeries,
}

impl IndicatorSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Series backing a level field. Delta fields have no series of their own.
    pub fn series_mut(&mut self, field: IndicatorField) -> Option<&mut LevelSeries> {
        match field {
            IndicatorField::Walcl => Some(&mut self.walcl),
            IndicatorField::Wresbal => Some(&mut self.wresbal),
            IndicatorField::Rrpon => Some(&mut self.rrpon),
            IndicatorField::Sofr => Some(&mut self.sofr),
            IndicatorField::Iorb => Some(&mut self.iorb),
            IndicatorField::Vix => Some(&mut self.vix),
            IndicatorField::HyOas => Some(&mut self.hy_oas),
            IndicatorField::T10y3m => Some(&mut self.t10y3m),
            IndicatorField::DxyBroad => Some(&mut self.dxy_broad),
            _ => None,
        }
    }

    /// Build the snapshot as of `date`.
    ///
    /// Gaps stay `None` so validation can reject them downstream.
    pub fn snapshot_at(&self, date: NaiveDate) -> IndicatorSnapshot {
        IndicatorSnapshot {
            walcl: self.walcl.value_at(date),
            d_walcl_4w: self.walcl.delta_4w(date),
            wresbal: self.wresbal.value_at(date),
            d_wresbal_4w: self.wresbal.delta_4w(date),
            rrpon: self.rrpon.value_at(date),
            d_rrpon_4w: self.rrpon.delta_4w(date),
            sofr: self.sofr.value_at(date),
            iorb: self.iorb.value_at(date),
            vix: self.vix.value_at(date),
            hy_oas: self.hy_oas.value_at(date),
            t10y3m: self.t10y3m.value_at(date),
            d_t10y3m_4w: self.t10y3m.delta_4w(date),
            dxy_broad: self.dxy_broad.value_at(date),
            d_dxy_4w: self.dxy_broad.delta_4w(date),
        }
    }

    /// Most recent date any series has an observation for.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        [
            &self.walcl,
            &self.wresbal,
            &self.rrpon,
            &self.sofr,
            &self.iorb,
            &self.vix,
            &self.hy_oas,
            &self.t10y3m,
            &self.dxy_broad,
        ]
        .iter()
        .filter_map(|s| s.last_date())
        .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_value_at_carries_forward() {
        let series: LevelSeries = vec![(d(2024, 1, 3), 100.0), (d(2024, 1, 10), 110.0)]
            .into_iter()
            .collect();

        assert_eq!(series.value_at(d(2024, 1, 2)), None);
        assert_eq!(series.value_at(d(2024, 1, 3)), Some(100.0));
        assert_eq!(series.value_at(d(2024, 1, 9)), Some(100.0));
        assert_eq!(series.value_at(d(2024, 2, 1)), Some(110.0));
    }

    #[test]
    fn test_delta_4w_weekly_series() {
        // Weekly Wednesday observations
        let series: LevelSeries = (0..6)
            .map(|w| (d(2024, 1, 3) + Duration::weeks(w), 1000.0 + 10.0 * w as f64))
            .collect();

        // 2024-02-07 is week 5, four weeks earlier is week 1
        assert_eq!(series.delta_4w(d(2024, 2, 7)), Some(40.0));
    }

    #[test]
    fn test_delta_needs_both_ends() {
        let series: LevelSeries = vec![(d(2024, 3, 1), 5.0)].into_iter().collect();
        assert_eq!(series.delta_4w(d(2024, 3, 1)), None);
        assert_eq!(series.delta_over(d(2024, 3, 2), 1), Some(0.0));
    }

    #[test]
    fn test_non_finite_dropped() {
        let mut series = LevelSeries::new();
        series.insert(d(2024, 1, 1), f64::NAN);
        assert!(series.is_empty());
        series.insert(d(2024, 1, 1), 1.0);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_snapshot_at_fills_levels_and_deltas() {
        let mut series = IndicatorSeries::new();
        series.walcl = vec![(d(2024, 1, 3), 7_700_000.0), (d(2024, 1, 31), 7_640_000.0)]
            .into_iter()
            .collect();
        series.dxy_broad = vec![(d(2024, 1, 3), 120.0), (d(2024, 1, 31), 121.0)]
            .into_iter()
            .collect();

        let snapshot = series.snapshot_at(d(2024, 1, 31));
        assert_eq!(snapshot.walcl, Some(7_640_000.0));
        assert_eq!(snapshot.d_walcl_4w, Some(-60_000.0));
        assert_eq!(snapshot.dxy_broad, Some(121.0));
        assert_eq!(snapshot.d_dxy_4w, Some(1.0));
        assert_eq!(snapshot.vix, None);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_series_mut_only_for_levels() {
        let mut series = IndicatorSeries::new();
        assert!(series.series_mut(IndicatorField::Vix).is_some());
        assert!(series.series_mut(IndicatorField::DWalcl4w).is_none());

        if let Some(s) = series.series_mut(IndicatorField::Sofr) {
            s.insert(d(2024, 5, 1), 5.31);
        }
        assert_eq!(series.latest_date(), Some(d(2024, 5, 1)));
    }
}
