//! Display colors for context and risk badges.

use serde::{Deserialize, Serialize};

use super::types::{Context, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Green,
    Yellow,
    Red,
    /// Fallback for labels that are not recognized.
    Gray,
}

impl DisplayColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }
}

pub fn context_color(context: Context) -> DisplayColor {
    match context {
        Context::StressGuidato => DisplayColor::Red,
        Context::CrescitaGuidata => DisplayColor::Green,
        Context::Ambiguo => DisplayColor::Yellow,
    }
}

pub fn risk_color(risk: RiskLevel) -> DisplayColor {
    match risk {
        RiskLevel::Normale => DisplayColor::Green,
        RiskLevel::Elevato => DisplayColor::Yellow,
        RiskLevel::Alto => DisplayColor::Red,
    }
}

/// Color for a stored context label, gray if unknown.
pub fn context_color_for_label(label: &str) -> DisplayColor {
    Context::parse(label)
        .map(context_color)
        .unwrap_or(DisplayColor::Gray)
}

/// Color for a stored risk label, gray if unknown.
pub fn risk_color_for_label(label: &str) -> DisplayColor {
    RiskLevel::parse(label)
        .map(risk_color)
        .unwrap_or(DisplayColor::Gray)
}
