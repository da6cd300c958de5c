//! Bullish call-out gate.

use super::types::{Confidence, Context, RiskLevel, Scenario, ScenarioState, Sustainability};

/// Whether the optimistic call-out may be shown for this state.
///
/// All five conditions must hold: stealth QE, growth-led context, normal
/// risk, sustainability above `bassa`, confidence above `bassa`.
pub fn can_show_bullish(state: &ScenarioState) -> bool {
    state.scenario == Scenario::StealthQe
        && state.context == Context::CrescitaGuidata
        && state.risk_level == RiskLevel::Normale
        && state.sustainability != Sustainability::Bassa
        && state.confidence != Confidence::Bassa
}

impl ScenarioState {
    pub fn can_show_bullish(&self) -> bool {
        can_show_bullish(self)
    }
}
