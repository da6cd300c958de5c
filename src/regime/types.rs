//! Classification labels and the scenario state record.
//!
//! Labels serialize to the values stored alongside each snapshot
//! (`stealth_qe`, `crescita_guidata`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Liquidity regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Neutral,
    /// Balance sheet or reserves growing while reverse repo drains.
    StealthQe,
    Qe,
    Qt,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [Self::Neutral, Self::StealthQe, Self::Qe, Self::Qt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::StealthQe => "stealth_qe",
            Self::Qe => "qe",
            Self::Qt => "qt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Neutral => "No clear balance-sheet impulse",
            Self::StealthQe => "Liquidity released through reverse-repo drain",
            Self::Qe => "Balance sheet and reserves expanding",
            Self::Qt => "Balance sheet and reserves contracting",
        }
    }
}

/// Which signal family dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Context {
    StressGuidato,
    CrescitaGuidata,
    Ambiguo,
}

impl Context {
    pub const ALL: [Context; 3] = [Self::StressGuidato, Self::CrescitaGuidata, Self::Ambiguo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StressGuidato => "stress_guidato",
            Self::CrescitaGuidata => "crescita_guidata",
            Self::Ambiguo => "ambiguo",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::StressGuidato => "Stress-driven",
            Self::CrescitaGuidata => "Growth-driven",
            Self::Ambiguo => "Ambiguous",
        }
    }
}

/// Confidence that the current regime persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sustainability {
    Alta,
    Media,
    Bassa,
}

impl Sustainability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alta => "alta",
            Self::Media => "media",
            Self::Bassa => "bassa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Normale,
    Elevato,
    Alto,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [Self::Normale, Self::Elevato, Self::Alto];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normale => "normale",
            Self::Elevato => "elevato",
            Self::Alto => "alto",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// Strength of the vote that produced the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Alta,
    Media,
    Bassa,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alta => "alta",
            Self::Media => "media",
            Self::Bassa => "bassa",
        }
    }
}

/// Raw condition that fired during classification.
///
/// Variant order is the order drivers are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Driver {
    #[serde(rename = "reserves increasing")]
    ReservesIncreasing,
    #[serde(rename = "reverse-repo draining")]
    ReverseRepoDraining,
    #[serde(rename = "volatility elevated")]
    VolatilityElevated,
    #[serde(rename = "credit spreads widening")]
    CreditSpreadsWidening,
    #[serde(rename = "dollar strengthening")]
    DollarStrengthening,
    #[serde(rename = "curve inverted")]
    CurveInverted,
    #[serde(rename = "financing-rate tension")]
    FinancingRateTension,
    #[serde(rename = "balance sheet expanding")]
    BalanceSheetExpanding,
    #[serde(rename = "balance sheet contracting")]
    BalanceSheetContracting,
}

impl Driver {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ReservesIncreasing => "reserves increasing",
            Self::ReverseRepoDraining => "reverse-repo draining",
            Self::VolatilityElevated => "volatility elevated",
            Self::CreditSpreadsWidening => "credit spreads widening",
            Self::DollarStrengthening => "dollar strengthening",
            Self::CurveInverted => "curve inverted",
            Self::FinancingRateTension => "financing-rate tension",
            Self::BalanceSheetExpanding => "balance sheet expanding",
            Self::BalanceSheetContracting => "balance sheet contracting",
        }
    }
}

/// Output of one classification.
///
/// Built fresh per call and never updated afterwards. `date` is the day
/// the classification was computed, not a timestamp from the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioState {
    pub scenario: Scenario,
    pub context: Context,
    pub sustainability: Sustainability,
    pub risk_level: RiskLevel,
    pub confidence: Confidence,
    pub drivers: Vec<Driver>,
    pub date: NaiveDate,
}

impl ScenarioState {
    pub fn driver_labels(&self) -> Vec<&'static str> {
        self.drivers.iter().map(|d| d.label()).collect()
    }
}
