//! Liquidity regime CLI.
//!
//! # Usage
//!
//! ```bash
//! # Classify the latest snapshot in a history file
//! liquidity-regime classify --snapshot data/indicators.json
//!
//! # Classify as of a specific date
//! liquidity-regime classify --snapshot data/indicators.parquet --date 2024-06-12
//!
//! # Replay the classifier over a whole history
//! liquidity-regime history --input data/indicators.parquet
//!
//! # Show metric descriptions
//! liquidity-regime glossary --metric hyOAS
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use liquidity_regime::glossary;
use liquidity_regime::regime::{context_color, risk_color};
use liquidity_regime::{
    AppConfig, DisplayColor, HistoryAnalyzer, ScenarioClassifier, ScenarioState, SnapshotLoader,
};

const DEFAULT_LOG_FILTER: &str = "liquidity_regime=info";

#[derive(Parser)]
#[command(name = "liquidity-regime")]
#[command(about = "Classify the liquidity regime from Fed and market indicators")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the most recent snapshot in a file
    Classify {
        /// Snapshot or history file (.json or .parquet)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Classification date (YYYY-MM-DD), defaults to today in UTC
        #[arg(long)]
        date: Option<String>,
    },

    /// Classify every snapshot in a history file
    History {
        /// History file (.json or .parquet)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print metric descriptions
    Glossary {
        /// Wire name of a single metric (e.g. walcl, hyOAS)
        #[arg(long)]
        metric: Option<String>,
    },
}

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    #[serde(flatten)]
    state: &'a ScenarioState,
    observed: NaiveDate,
    can_show_bullish: bool,
    context_color: DisplayColor,
    risk_color: DisplayColor,
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let directive = std::env::var("RUST_LOG")
        .ok()
        .or_else(|| config.log_filter.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&directive).context("Invalid log filter")?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn resolve_input(arg: Option<PathBuf>, config: &AppConfig) -> Result<PathBuf> {
    arg.or_else(|| config.history_path.clone())
        .context("No input file given and no history_path configured")
}

fn cmd_classify(config: &AppConfig, path: PathBuf, date: Option<String>) -> Result<()> {
    let as_of = match date {
        Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .context("Invalid --date, expected YYYY-MM-DD")?,
        None => Utc::now().date_naive(),
    };

    let latest = SnapshotLoader::new(&path)
        .latest()
        .with_context(|| format!("Failed to load {}", path.display()))?;
    info!("Classifying snapshot observed {} as of {}", latest.date, as_of);

    let classifier = ScenarioClassifier::new(config.thresholds.clone());
    let state = classifier
        .classify(&latest.snapshot, as_of)
        .with_context(|| format!("Snapshot for {} cannot be classified", latest.date))?;

    let output = ClassifyOutput {
        state: &state,
        observed: latest.date,
        can_show_bullish: state.can_show_bullish(),
        context_color: context_color(state.context),
        risk_color: risk_color(state.risk_level),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_history(config: &AppConfig, path: PathBuf, json: bool) -> Result<()> {
    let snapshots = SnapshotLoader::new(&path)
        .load()
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let report = HistoryAnalyzer::new(config.thresholds.clone()).analyze(&snapshots);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.summary());
    println!();

    for stats in report.scenario_stats.values() {
        println!(
            "  {:<11} {:>5} days ({:>5.1}%)  {} to {}",
            stats.scenario.as_str(),
            stats.days,
            stats.pct_of_total,
            stats.first_seen,
            stats.last_seen
        );
    }

    if !report.transitions.is_empty() {
        println!();
        println!("Transitions:");
        for t in &report.transitions {
            println!("  {}  {} -> {}", t.date, t.from.as_str(), t.to.as_str());
        }
    }

    if let Some((scenario, since, length)) = report.current_streak() {
        println!();
        println!(
            "Current: {} since {} ({} snapshots)",
            scenario.as_str(),
            since,
            length
        );
    }

    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.date, skipped.reason);
    }

    Ok(())
}

fn cmd_glossary(metric: Option<String>) -> Result<()> {
    match metric {
        Some(name) => {
            let Some(entry) = glossary::lookup(&name) else {
                bail!("Unknown metric: {}", name);
            };
            println!("{} [{}]", entry.label, entry.unit);
            println!("  {}", entry.description);
        }
        None => {
            for entry in glossary::entries() {
                println!("{:<12} {} [{}]", entry.field.wire_name(), entry.label, entry.unit);
                println!("{:<12} {}", "", entry.description);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    init_logging(&config)?;

    match cli.command {
        Commands::Classify { snapshot, date } => {
            let path = resolve_input(snapshot, &config)?;
            cmd_classify(&config, path, date)?;
        }
        Commands::History { input, json } => {
            let path = resolve_input(input, &config)?;
            cmd_history(&config, path, json)?;
        }
        Commands::Glossary { metric } => cmd_glossary(metric)?,
    }

    Ok(())
}
