//! Core indicator types.
//!
//! `IndicatorSnapshot` mirrors the flat record stored upstream: every
//! signal is nullable. `Indicators` is the validated form the classifier
//! runs on, with every required signal present and finite.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named signals of an indicator snapshot, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorField {
    Walcl,
    DWalcl4w,
    Wresbal,
    DWresbal4w,
    Rrpon,
    DRrpon4w,
    Sofr,
    Iorb,
    Vix,
    HyOas,
    T10y3m,
    DT10y3m4w,
    DxyBroad,
    DDxy4w,
}

impl IndicatorField {
    pub const ALL: [IndicatorField; 14] = [
        Self::Walcl,
        Self::DWalcl4w,
        Self::Wresbal,
        Self::DWresbal4w,
        Self::Rrpon,
        Self::DRrpon4w,
        Self::Sofr,
        Self::Iorb,
        Self::Vix,
        Self::HyOas,
        Self::T10y3m,
        Self::DT10y3m4w,
        Self::DxyBroad,
        Self::DDxy4w,
    ];

    /// Name used in stored records and history files.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Walcl => "walcl",
            Self::DWalcl4w => "dWalcl_4w",
            Self::Wresbal => "wresbal",
            Self::DWresbal4w => "dWresbal_4w",
            Self::Rrpon => "rrpon",
            Self::DRrpon4w => "dRrpon_4w",
            Self::Sofr => "sofr",
            Self::Iorb => "iorb",
            Self::Vix => "vix",
            Self::HyOas => "hyOAS",
            Self::T10y3m => "t10y3m",
            Self::DT10y3m4w => "dT10y3m_4w",
            Self::DxyBroad => "dxyBroad",
            Self::DDxy4w => "dDxy_4w",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }

    /// Whether classification needs this signal.
    ///
    /// `dxyBroad` is carried for forward compatibility only.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::DxyBroad)
    }
}

impl fmt::Display for IndicatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

fn field_list(fields: &[IndicatorField]) -> String {
    fields
        .iter()
        .map(|f| f.wire_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error(
        "Invalid snapshot: missing [{}], non-finite [{}]",
        field_list(.missing),
        field_list(.non_finite)
    )]
    InvalidSnapshot {
        missing: Vec<IndicatorField>,
        non_finite: Vec<IndicatorField>,
    },
}

/// Raw indicator record as delivered by the indicator source.
///
/// Absent observations are `None`; they are never read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSnapshot {
    /// Fed total assets.
    pub walcl: Option<f64>,
    #[serde(rename = "dWalcl_4w")]
    pub d_walcl_4w: Option<f64>,

    /// Reserve balances.
    pub wresbal: Option<f64>,
    #[serde(rename = "dWresbal_4w")]
    pub d_wresbal_4w: Option<f64>,

    /// Overnight reverse repo.
    pub rrpon: Option<f64>,
    #[serde(rename = "dRrpon_4w")]
    pub d_rrpon_4w: Option<f64>,

    pub sofr: Option<f64>,
    pub iorb: Option<f64>,

    pub vix: Option<f64>,
    #[serde(rename = "hyOAS")]
    pub hy_oas: Option<f64>,

    /// 10Y minus 3M Treasury spread.
    pub t10y3m: Option<f64>,
    #[serde(rename = "dT10y3m_4w")]
    pub d_t10y3m_4w: Option<f64>,

    #[serde(rename = "dxyBroad")]
    pub dxy_broad: Option<f64>,
    #[serde(rename = "dDxy_4w")]
    pub d_dxy_4w: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn get(&self, field: IndicatorField) -> Option<f64> {
        match field {
            IndicatorField::Walcl => self.walcl,
            IndicatorField::DWalcl4w => self.d_walcl_4w,
            IndicatorField::Wresbal => self.wresbal,
            IndicatorField::DWresbal4w => self.d_wresbal_4w,
            IndicatorField::Rrpon => self.rrpon,
            IndicatorField::DRrpon4w => self.d_rrpon_4w,
            IndicatorField::Sofr => self.sofr,
            IndicatorField::Iorb => self.iorb,
            IndicatorField::Vix => self.vix,
            IndicatorField::HyOas => self.hy_oas,
            IndicatorField::T10y3m => self.t10y3m,
            IndicatorField::DT10y3m4w => self.d_t10y3m_4w,
            IndicatorField::DxyBroad => self.dxy_broad,
            IndicatorField::DDxy4w => self.d_dxy_4w,
        }
    }

    pub fn set(&mut self, field: IndicatorField, value: Option<f64>) {
        let slot = match field {
            IndicatorField::Walcl => &mut self.walcl,
            IndicatorField::DWalcl4w => &mut self.d_walcl_4w,
            IndicatorField::Wresbal => &mut self.wresbal,
            IndicatorField::DWresbal4w => &mut self.d_wresbal_4w,
            IndicatorField::Rrpon => &mut self.rrpon,
            IndicatorField::DRrpon4w => &mut self.d_rrpon_4w,
            IndicatorField::Sofr => &mut self.sofr,
            IndicatorField::Iorb => &mut self.iorb,
            IndicatorField::Vix => &mut self.vix,
            IndicatorField::HyOas => &mut self.hy_oas,
            IndicatorField::T10y3m => &mut self.t10y3m,
            IndicatorField::DT10y3m4w => &mut self.d_t10y3m_4w,
            IndicatorField::DxyBroad => &mut self.dxy_broad,
            IndicatorField::DDxy4w => &mut self.d_dxy_4w,
        };
        *slot = value;
    }

    /// Check that every required signal is present and finite.
    ///
    /// All offending fields are reported, not just the first one.
    pub fn validate(&self) -> Result<Indicators, SnapshotError> {
        let mut missing = Vec::new();
        let mut non_finite = Vec::new();

        let mut take = |field: IndicatorField| -> f64 {
            match self.get(field) {
                Some(v) if v.is_finite() => v,
                Some(_) => {
                    non_finite.push(field);
                    f64::NAN
                }
                None => {
                    missing.push(field);
                    f64::NAN
                }
            }
        };

        let indicators = Indicators {
            walcl: take(IndicatorField::Walcl),
            d_walcl_4w: take(IndicatorField::DWalcl4w),
            wresbal: take(IndicatorField::Wresbal),
            d_wresbal_4w: take(IndicatorField::DWresbal4w),
            rrpon: take(IndicatorField::Rrpon),
            d_rrpon_4w: take(IndicatorField::DRrpon4w),
            sofr: take(IndicatorField::Sofr),
            iorb: take(IndicatorField::Iorb),
            vix: take(IndicatorField::Vix),
            hy_oas: take(IndicatorField::HyOas),
            t10y3m: take(IndicatorField::T10y3m),
            d_t10y3m_4w: take(IndicatorField::DT10y3m4w),
            dxy_broad: self.dxy_broad.filter(|v| v.is_finite()),
            d_dxy_4w: take(IndicatorField::DDxy4w),
        };

        if missing.is_empty() && non_finite.is_empty() {
            Ok(indicators)
        } else {
            Err(SnapshotError::InvalidSnapshot {
                missing,
                non_finite,
            })
        }
    }
}

/// Validated indicators. Every field except `dxy_broad` is a real observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    pub walcl: f64,
    pub d_walcl_4w: f64,
    pub wresbal: f64,
    pub d_wresbal_4w: f64,
    pub rrpon: f64,
    pub d_rrpon_4w: f64,
    pub sofr: f64,
    pub iorb: f64,
    pub vix: f64,
    pub hy_oas: f64,
    pub t10y3m: f64,
    pub d_t10y3m_4w: f64,
    pub dxy_broad: Option<f64>,
    pub d_dxy_4w: f64,
}

impl Indicators {
    /// SOFR minus IORB, the funding-stress spread.
    pub fn funding_spread(&self) -> f64 {
        self.sofr - self.iorb
    }
}

/// A snapshot tagged with the date its observations refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedSnapshot {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub snapshot: IndicatorSnapshot,
}

impl DatedSnapshot {
    pub fn new(date: NaiveDate, snapshot: IndicatorSnapshot) -> Self {
        Self { date, snapshot }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Snapshot with every field populated and no rule firing strongly.
    pub fn calm_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            walcl: Some(7_400_000.0),
            d_walcl_4w: Some(0.0),
            wresbal: Some(3_200_000.0),
            d_wresbal_4w: Some(0.0),
            rrpon: Some(450.0),
            d_rrpon_4w: Some(0.0),
            sofr: Some(5.31),
            iorb: Some(5.40),
            vix: Some(19.0),
            hy_oas: Some(4.5),
            t10y3m: Some(0.0),
            d_t10y3m_4w: Some(0.0),
            dxy_broad: Some(121.3),
            d_dxy_4w: Some(0.0),
        }
    }
}
