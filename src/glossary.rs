//! Metric glossary shown next to dashboard tiles.
//!
//! Built once on first access and read-only afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::data::IndicatorField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricInfo {
    pub field: IndicatorField,
    pub label: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
}

const fn info(
    field: IndicatorField,
    label: &'static str,
    description: &'static str,
    unit: &'static str,
) -> MetricInfo {
    MetricInfo {
        field,
        label,
        description,
        unit,
    }
}

static ENTRIES: [MetricInfo; 14] = [
    info(
        IndicatorField::Walcl,
        "Fed balance sheet (WALCL)",
        "Total assets held by the Federal Reserve. Growth points to QE, contraction to QT.",
        "USD mn",
    ),
    info(
        IndicatorField::DWalcl4w,
        "Balance sheet 4w change",
        "Change in Fed total assets over the last four weeks.",
        "USD mn",
    ),
    info(
        IndicatorField::Wresbal,
        "Bank reserves (WRESBAL)",
        "Deposits banks hold at the Fed. A proxy for how abundant liquidity is.",
        "USD bn",
    ),
    info(
        IndicatorField::DWresbal4w,
        "Reserves 4w change",
        "Change in reserve balances over the last four weeks.",
        "USD bn",
    ),
    info(
        IndicatorField::Rrpon,
        "Overnight reverse repo (RRPONTSYD)",
        "Cash parked at the Fed's reverse repo facility. A falling balance releases liquidity.",
        "USD bn",
    ),
    info(
        IndicatorField::DRrpon4w,
        "Reverse repo 4w change",
        "Change in reverse repo usage over the last four weeks.",
        "USD bn",
    ),
    info(
        IndicatorField::Sofr,
        "SOFR",
        "Secured overnight financing rate, the market cost of overnight funding.",
        "%",
    ),
    info(
        IndicatorField::Iorb,
        "IORB",
        "Interest on reserve balances, the Fed's administered floor. SOFR above IORB signals funding tension.",
        "%",
    ),
    info(
        IndicatorField::Vix,
        "VIX",
        "Implied volatility of the S&P 500. Above 22 counts as stress, below 16 as calm.",
        "index",
    ),
    info(
        IndicatorField::HyOas,
        "High-yield OAS",
        "Option-adjusted spread of high-yield corporate bonds over Treasuries.",
        "%",
    ),
    info(
        IndicatorField::T10y3m,
        "10Y-3M spread",
        "10-year minus 3-month Treasury yield. Negative means an inverted curve.",
        "%",
    ),
    info(
        IndicatorField::DT10y3m4w,
        "Curve 4w change",
        "Change in the 10Y-3M spread over the last four weeks.",
        "%",
    ),
    info(
        IndicatorField::DxyBroad,
        "Broad dollar index",
        "Trade-weighted US dollar index. Informational only.",
        "index",
    ),
    info(
        IndicatorField::DDxy4w,
        "Dollar 4w change",
        "Change in the broad dollar index over the last four weeks. A rising dollar tightens global liquidity.",
        "index",
    ),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static MetricInfo>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .map(|e| (e.field.wire_name(), e))
        .collect()
});

/// Look up a metric by wire name (`walcl`, `hyOAS`, ...).
pub fn lookup(name: &str) -> Option<&'static MetricInfo> {
    BY_NAME.get(name).copied()
}

/// All entries in field order.
pub fn entries() -> &'static [MetricInfo] {
    &ENTRIES
}
