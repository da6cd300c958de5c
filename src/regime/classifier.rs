//! Liquidity scenario classifier.
//!
//! Maps one indicator snapshot to a `ScenarioState`:
//! 1. Base scenario from balance-sheet, reserve and reverse-repo deltas
//! 2. Stress and growth votes over market signals
//! 3. Context from the vote
//! 4. Sustainability
//! 5. Risk level
//! 6. Confidence
//! 7. Drivers
//!
//! The classifier holds no state between calls. The classification date
//! is passed in by the caller.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::data::{IndicatorSnapshot, Indicators, SnapshotError};

use super::thresholds::ScenarioThresholds;
use super::types::{Confidence, Context, Driver, RiskLevel, Scenario, ScenarioState, Sustainability};

/// Vote counts for the two signal families (0-5 each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalVotes {
    pub stress: u8,
    pub growth: u8,
}

impl SignalVotes {
    pub fn tally(ind: &Indicators, t: &ScenarioThresholds) -> Self {
        let stress = [
            ind.vix > t.stress_vix,
            ind.hy_oas > t.stress_hy_oas,
            ind.d_dxy_4w > t.stress_dxy_delta,
            ind.t10y3m < 0.0 && ind.d_t10y3m_4w < 0.0,
            ind.funding_spread() > t.stress_funding_spread,
        ];
        let growth = [
            ind.vix < t.growth_vix,
            ind.hy_oas < t.growth_hy_oas,
            ind.d_dxy_4w < t.growth_dxy_delta,
            ind.t10y3m > 0.0 || ind.d_t10y3m_4w > 0.0,
            rotation_ok(ind),
        ];

        Self {
            stress: count(&stress),
            growth: count(&growth),
        }
    }

    /// Size of the larger family.
    pub fn strongest(&self) -> u8 {
        self.stress.max(self.growth)
    }
}

fn count(conditions: &[bool]) -> u8 {
    conditions.iter().filter(|c| **c).count() as u8
}

/// Reserves rising while the reverse-repo facility drains.
fn rotation_ok(ind: &Indicators) -> bool {
    ind.d_wresbal_4w > 0.0 && ind.d_rrpon_4w < 0.0
}

/// Scenario classifier.
#[derive(Debug, Clone, Default)]
pub struct ScenarioClassifier {
    thresholds: ScenarioThresholds,
}

impl ScenarioClassifier {
    pub fn new(thresholds: ScenarioThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ScenarioThresholds {
        &self.thresholds
    }

    /// Validate the snapshot and classify it.
    pub fn classify(
        &self,
        snapshot: &IndicatorSnapshot,
        as_of: NaiveDate,
    ) -> Result<ScenarioState, SnapshotError> {
        let indicators = snapshot.validate()?;
        Ok(self.classify_indicators(&indicators, as_of))
    }

    /// Classify already-validated indicators. Never fails.
    pub fn classify_indicators(&self, ind: &Indicators, as_of: NaiveDate) -> ScenarioState {
        let scenario = self.base_scenario(ind);
        let votes = SignalVotes::tally(ind, &self.thresholds);
        let context = self.context(votes);
        let sustainability = self.sustainability(ind, votes, context);
        let risk_level = self.risk_level(ind, context, sustainability);
        let confidence = self.confidence(votes);
        let drivers = self.drivers(ind);

        debug!(
            scenario = scenario.as_str(),
            context = context.as_str(),
            stress_votes = votes.stress,
            growth_votes = votes.growth,
            drivers = drivers.len(),
            "classified snapshot"
        );

        ScenarioState {
            scenario,
            context,
            sustainability,
            risk_level,
            confidence,
            drivers,
            date: as_of,
        }
    }

    /// First matching rule wins: stealth QE, then QE, then QT.
    fn base_scenario(&self, ind: &Indicators) -> Scenario {
        let t = &self.thresholds;

        if (ind.d_walcl_4w > 0.0 || ind.d_wresbal_4w > 0.0) && ind.d_rrpon_4w < 0.0 {
            Scenario::StealthQe
        } else if ind.d_walcl_4w > t.qe_balance_sheet_delta && ind.d_wresbal_4w > t.qe_reserves_delta
        {
            Scenario::Qe
        } else if ind.d_walcl_4w < 0.0 && ind.d_wresbal_4w < 0.0 {
            Scenario::Qt
        } else {
            Scenario::Neutral
        }
    }

    fn context(&self, votes: SignalVotes) -> Context {
        let min = self.thresholds.min_context_votes;

        if votes.stress >= min && votes.stress > votes.growth {
            Context::StressGuidato
        } else if votes.growth >= min && votes.growth > votes.stress {
            Context::CrescitaGuidata
        } else {
            Context::Ambiguo
        }
    }

    fn sustainability(&self, ind: &Indicators, votes: SignalVotes, context: Context) -> Sustainability {
        let rotation = rotation_ok(ind);

        if rotation && votes.growth >= self.thresholds.min_context_votes {
            Sustainability::Alta
        } else if context == Context::StressGuidato || (!rotation && ind.d_walcl_4w > 0.0) {
            Sustainability::Bassa
        } else {
            Sustainability::Media
        }
    }

    fn risk_level(&self, ind: &Indicators, context: Context, sustainability: Sustainability) -> RiskLevel {
        let t = &self.thresholds;

        if context == Context::CrescitaGuidata && sustainability != Sustainability::Bassa {
            RiskLevel::Normale
        } else if context == Context::StressGuidato
            && (ind.vix > t.high_risk_vix || ind.hy_oas > t.high_risk_hy_oas)
        {
            RiskLevel::Alto
        } else {
            RiskLevel::Elevato
        }
    }

    fn confidence(&self, votes: SignalVotes) -> Confidence {
        let strongest = votes.strongest();

        if strongest >= self.thresholds.high_confidence_votes {
            Confidence::Alta
        } else if strongest == self.thresholds.min_context_votes {
            Confidence::Media
        } else {
            Confidence::Bassa
        }
    }

    fn drivers(&self, ind: &Indicators) -> Vec<Driver> {
        let t = &self.thresholds;

        let checks = [
            (ind.d_wresbal_4w > 0.0, Driver::ReservesIncreasing),
            (ind.d_rrpon_4w < 0.0, Driver::ReverseRepoDraining),
            (ind.vix > t.stress_vix, Driver::VolatilityElevated),
            (ind.hy_oas > t.stress_hy_oas, Driver::CreditSpreadsWidening),
            (ind.d_dxy_4w > t.stress_dxy_delta, Driver::DollarStrengthening),
            (ind.t10y3m < 0.0, Driver::CurveInverted),
            (ind.funding_spread() > t.stress_funding_spread, Driver::FinancingRateTension),
            (ind.d_walcl_4w > t.balance_sheet_driver_delta, Driver::BalanceSheetExpanding),
            (ind.d_walcl_4w < -t.balance_sheet_driver_delta, Driver::BalanceSheetContracting),
        ];

        checks
            .into_iter()
            .filter(|(fired, _)| *fired)
            .map(|(_, driver)| driver)
            .collect()
    }
}

/// Classify with the default thresholds.
pub fn derive_scenario(
    snapshot: &IndicatorSnapshot,
    as_of: NaiveDate,
) -> Result<ScenarioState, SnapshotError> {
    ScenarioClassifier::default().classify(snapshot, as_of)
}

/// Classify with the default thresholds, stamped with today's UTC date.
pub fn derive_scenario_today(snapshot: &IndicatorSnapshot) -> Result<ScenarioState, SnapshotError> {
    derive_scenario(snapshot, Utc::now().date_naive())
}
