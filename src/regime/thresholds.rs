//! Classification thresholds.
//!
//! The values are domain-calibrated and kept verbatim. Balance-sheet and
//! reserve deltas are in millions of USD, rates and spreads in percent.

use serde::{Deserialize, Serialize};

/// 4w balance-sheet growth required for outright QE.
pub const QE_BALANCE_SHEET_DELTA: f64 = 50_000.0;
/// 4w reserve growth required for outright QE.
pub const QE_RESERVES_DELTA: f64 = 100.0;

pub const STRESS_VIX: f64 = 22.0;
pub const STRESS_HY_OAS: f64 = 5.5;
pub const STRESS_DXY_DELTA: f64 = 0.5;
/// SOFR - IORB above this signals funding tension.
pub const STRESS_FUNDING_SPREAD: f64 = 0.15;

pub const GROWTH_VIX: f64 = 16.0;
pub const GROWTH_HY_OAS: f64 = 4.0;
pub const GROWTH_DXY_DELTA: f64 = -0.5;

pub const HIGH_RISK_VIX: f64 = 24.0;
pub const HIGH_RISK_HY_OAS: f64 = 6.0;

/// Balance-sheet move (either direction) reported as a driver.
pub const BALANCE_SHEET_DRIVER_DELTA: f64 = 50_000.0;

/// Minimum votes for a signal family to lead the context.
pub const MIN_CONTEXT_VOTES: u8 = 2;
/// Votes at or above this give high confidence.
pub const HIGH_CONFIDENCE_VOTES: u8 = 3;

/// Threshold set used by the classifier.
///
/// Every field defaults to the constant of the same name, so a config
/// file only needs to list the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioThresholds {
    pub qe_balance_sheet_delta: f64,
    pub qe_reserves_delta: f64,
    pub stress_vix: f64,
    pub stress_hy_oas: f64,
    pub stress_dxy_delta: f64,
    pub stress_funding_spread: f64,
    pub growth_vix: f64,
    pub growth_hy_oas: f64,
    pub growth_dxy_delta: f64,
    pub high_risk_vix: f64,
    pub high_risk_hy_oas: f64,
    pub balance_sheet_driver_delta: f64,
    pub min_context_votes: u8,
    pub high_confidence_votes: u8,
}

impl Default for ScenarioThresholds {
    fn default() -> Self {
        Self {
            qe_balance_sheet_delta: QE_BALANCE_SHEET_DELTA,
            qe_reserves_delta: QE_RESERVES_DELTA,
            stress_vix: STRESS_VIX,
            stress_hy_oas: STRESS_HY_OAS,
            stress_dxy_delta: STRESS_DXY_DELTA,
            stress_funding_spread: STRESS_FUNDING_SPREAD,
            growth_vix: GROWTH_VIX,
            growth_hy_oas: GROWTH_HY_OAS,
            growth_dxy_delta: GROWTH_DXY_DELTA,
            high_risk_vix: HIGH_RISK_VIX,
            high_risk_hy_oas: HIGH_RISK_HY_OAS,
            balance_sheet_driver_delta: BALANCE_SHEET_DRIVER_DELTA,
            min_context_votes: MIN_CONTEXT_VOTES,
            high_confidence_votes: HIGH_CONFIDENCE_VOTES,
        }
    }
}
