use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use admission::AdmissionEngine;
use common::{Config, StrategyConfig};

/// Strategy snapshot file consumed by the checker: the same records the
/// persistence layer would hand the strategy-management API.
///
/// Example `config/strategies.toml`:
/// ```toml
/// [[strategy]]
/// id = "s1"
/// templateId = "tpl-rookie-risers"
/// type = "rookie_risers"
/// isActive = true
///
/// [strategy.parameters]
/// performanceThreshold = 0.7
/// priceLimit = 200.0
/// minGamesPlayed = 10
///
/// [strategy.budget]
/// percentage = 0.3
/// maxAmount = 500.0
/// dailyLimit = 100.0
///
/// [strategy.riskControls]
/// maxConcurrentTrades = 3
/// ```
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(rename = "strategy")]
    strategies: Vec<StrategyConfig>,
}

impl SnapshotFile {
    /// Load from a TOML file. Exits process on error.
    fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
            panic!("Failed to read strategy snapshot at '{path}': {e}")
        });
        toml::from_str(&content).unwrap_or_else(|e| {
            panic!("Failed to parse strategy snapshot at '{path}': {e}")
        })
    }
}

fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(path = %cfg.snapshot_path, "admitctl starting");

    let snapshot = SnapshotFile::load(&cfg.snapshot_path);
    let engine = AdmissionEngine::default();

    let mut failed = false;

    // ── Per-strategy parameter validation ─────────────────────────────────────
    for strategy in &snapshot.strategies {
        let result = engine
            .validate_parameters(strategy.strategy_type, &strategy.parameters)
            .unwrap_or_else(|e| panic!("Snapshot references unknown type: {e}"));

        if result.is_valid() {
            println!("ok    {} ({})", strategy.id, strategy.strategy_type);
        } else {
            failed = true;
            println!("FAIL  {} ({})", strategy.id, strategy.strategy_type);
            for error in &result.errors {
                println!("      error: {error}");
            }
        }
    }

    // ── Joint admissibility of the active set ─────────────────────────────────
    let active: Vec<StrategyConfig> = snapshot
        .strategies
        .iter()
        .filter(|s| s.is_active)
        .cloned()
        .collect();

    let compat = engine.validate_compatibility(&active, &cfg.account_limits);
    println!(
        "\nactive set: {} of {} strategies, cap ${:.2}/day, {} concurrent trades",
        active.len(),
        snapshot.strategies.len(),
        cfg.account_limits.daily_spending_cap,
        cfg.account_limits.concurrency_ceiling
    );
    for error in &compat.errors {
        println!("  error: {error}");
    }
    for warning in &compat.warnings {
        println!("  warning: {warning}");
    }
    if compat.is_valid() {
        println!("  jointly admissible");
    } else {
        failed = true;
    }

    if failed {
        std::process::exit(1);
    }
}
