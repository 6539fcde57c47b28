use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// The three built-in automated strategy types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    RookieRisers,
    PostGameSpikes,
    ArbitrageMode,
}

impl StrategyType {
    /// All types in catalog registration order. This order is load-bearing:
    /// it fixes template listing order and warning emission order.
    pub const ALL: [StrategyType; 3] = [
        StrategyType::RookieRisers,
        StrategyType::PostGameSpikes,
        StrategyType::ArbitrageMode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyType::RookieRisers => "rookie_risers",
            StrategyType::PostGameSpikes => "post_game_spikes",
            StrategyType::ArbitrageMode => "arbitrage_mode",
        }
    }
}

impl std::fmt::Display for StrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StrategyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rookie_risers" => Ok(StrategyType::RookieRisers),
            "post_game_spikes" => Ok(StrategyType::PostGameSpikes),
            "arbitrage_mode" => Ok(StrategyType::ArbitrageMode),
            other => Err(Error::UnknownStrategyType(other.to_string())),
        }
    }
}

/// Raw strategy parameters as stored by the dashboard API: a JSON object with
/// camelCase keys, shape dictated by the strategy type. Kept untyped here so
/// that configurations written by older or newer dashboard versions can still
/// be loaded and re-validated.
pub type ParameterMap = Map<String, Value>;

/// How much of the user's funds a strategy may commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    /// Fraction of the total bankroll, 0..=1. Summed across all active
    /// strategies by the compatibility validator.
    pub percentage: f64,
    /// Hard USD cap on total open exposure for this strategy.
    pub max_amount: f64,
    /// USD the strategy may spend per calendar day.
    pub daily_limit: f64,
}

/// Per-strategy risk limits applied by the (external) execution pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskControls {
    /// Simultaneous open trades this strategy may hold.
    pub max_concurrent_trades: u32,
    /// Optional per-trade stop-loss, e.g. 0.05 = close at -5%.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss_pct: Option<f64>,
}

/// One user's configured instance of a strategy template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    pub id: String,
    pub template_id: String,
    #[serde(rename = "type")]
    pub strategy_type: StrategyType,
    pub parameters: ParameterMap,
    pub budget: BudgetAllocation,
    pub risk_controls: RiskControls,
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl StrategyConfig {
    /// Build a new (inactive) strategy with a generated id.
    pub fn new(
        template_id: impl Into<String>,
        strategy_type: StrategyType,
        parameters: ParameterMap,
        budget: BudgetAllocation,
        risk_controls: RiskControls,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            template_id: template_id.into(),
            strategy_type,
            parameters,
            budget,
            risk_controls,
            is_active: false,
            updated_at: Utc::now(),
        }
    }
}

/// Account-level ceilings shared by every active strategy. Supplied by the
/// caller (the user/account service owns these values, not this engine).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLimits {
    /// Maximum combined `daily_limit` across active strategies, USD.
    pub daily_spending_cap: f64,
    /// Maximum combined `max_concurrent_trades` across active strategies.
    pub concurrency_ceiling: u32,
}

/// Outcome of a validation pass. Errors block activation; warnings are
/// advisory only. Both sequences preserve rule evaluation order, which is
/// fixed per validator so identical inputs always produce identical results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn push_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Append another result's findings, preserving order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}
