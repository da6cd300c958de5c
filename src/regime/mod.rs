//! Liquidity regime classification.
//!
//! Turns an indicator snapshot into a scenario label with context,
//! sustainability, risk and confidence:
//! - Stealth QE: balance sheet or reserves up, reverse repo draining
//! - QE: balance sheet > +50bn and reserves > +100 over 4 weeks
//! - QT: balance sheet and reserves both contracting
//! - Neutral: none of the above

pub mod classifier;
pub mod gate;
pub mod palette;
pub mod thresholds;
pub mod types;

pub use classifier::{derive_scenario, derive_scenario_today, ScenarioClassifier, SignalVotes};
pub use gate::can_show_bullish;
pub use palette::{context_color, context_color_for_label, risk_color, risk_color_for_label, DisplayColor};
pub use thresholds::ScenarioThresholds;
pub use types::{Confidence, Context, Driver, RiskLevel, Scenario, ScenarioState, Sustainability};
