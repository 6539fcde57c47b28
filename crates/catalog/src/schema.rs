use serde::{Deserialize, Serialize};

use common::StrategyType;

/// Inclusive-by-default numeric range for fractional fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloatBounds {
    pub min: f64,
    pub max: f64,
    /// When true the lower bound itself is not allowed (e.g. price > 0).
    pub exclusive_min: bool,
}

impl FloatBounds {
    pub const fn inclusive(min: f64, max: f64) -> Self {
        Self { min, max, exclusive_min: false }
    }

    pub const fn above(min: f64, max: f64) -> Self {
        Self { min, max, exclusive_min: true }
    }

    pub fn contains(&self, value: f64) -> bool {
        let lower_ok = if self.exclusive_min { value > self.min } else { value >= self.min };
        lower_ok && value <= self.max
    }

    /// Bound description used in error messages shown to the end user.
    pub fn describe(&self) -> String {
        if self.exclusive_min {
            format!("greater than {} and at most {}", self.min, self.max)
        } else {
            format!("between {} and {}", self.min, self.max)
        }
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IntBounds {
    pub min: i64,
    pub max: i64,
}

impl IntBounds {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn describe(&self) -> String {
        format!("an integer between {} and {}", self.min, self.max)
    }
}

/// Box-score statistics a post-game-spike strategy may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceMetric {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
}

impl PerformanceMetric {
    pub const ALL: [PerformanceMetric; 5] = [
        PerformanceMetric::Points,
        PerformanceMetric::Rebounds,
        PerformanceMetric::Assists,
        PerformanceMetric::Steals,
        PerformanceMetric::Blocks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceMetric::Points => "points",
            PerformanceMetric::Rebounds => "rebounds",
            PerformanceMetric::Assists => "assists",
            PerformanceMetric::Steals => "steals",
            PerformanceMetric::Blocks => "blocks",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == s)
    }
}

impl std::fmt::Display for PerformanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter schema for one strategy type. One variant per type, each
/// carrying only that type's bounds, so a rookie-risers schema can never be
/// consulted for an arbitrage field — cross-type leakage is unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterSchema {
    RookieRisers(RookieRisersSchema),
    PostGameSpikes(PostGameSpikesSchema),
    ArbitrageMode(ArbitrageModeSchema),
}

impl ParameterSchema {
    pub fn strategy_type(&self) -> StrategyType {
        match self {
            ParameterSchema::RookieRisers(_) => StrategyType::RookieRisers,
            ParameterSchema::PostGameSpikes(_) => StrategyType::PostGameSpikes,
            ParameterSchema::ArbitrageMode(_) => StrategyType::ArbitrageMode,
        }
    }
}

/// Buy rookies whose recent performance clears a threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RookieRisersSchema {
    pub performance_threshold: FloatBounds,
    pub price_limit: FloatBounds,
    pub min_games_played: IntBounds,
}

impl Default for RookieRisersSchema {
    fn default() -> Self {
        Self {
            performance_threshold: FloatBounds::inclusive(0.0, 1.0),
            price_limit: FloatBounds::above(0.0, 10_000.0),
            min_games_played: IntBounds::new(1, 100),
        }
    }
}

/// Trade moments of players right after standout box-score games.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostGameSpikesSchema {
    /// `timeWindow` is expressed in hours after the game.
    pub time_window: IntBounds,
    pub price_change_threshold: FloatBounds,
}

impl Default for PostGameSpikesSchema {
    fn default() -> Self {
        Self {
            time_window: IntBounds::new(1, 168),
            price_change_threshold: FloatBounds::inclusive(0.0, 1.0),
        }
    }
}

/// Exploit price gaps for the same moment across marketplaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageModeSchema {
    pub price_difference_threshold: FloatBounds,
    /// `maxExecutionTime` is expressed in seconds.
    pub max_execution_time: IntBounds,
    /// Arbitrage needs at least this many distinct marketplaces.
    pub min_marketplaces: usize,
}

impl Default for ArbitrageModeSchema {
    fn default() -> Self {
        Self {
            price_difference_threshold: FloatBounds::inclusive(0.0, 1.0),
            max_execution_time: IntBounds::new(1, 300),
            min_marketplaces: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusive_lower_bound_excludes_the_bound_itself() {
        let bounds = FloatBounds::above(0.0, 10_000.0);
        assert!(!bounds.contains(0.0));
        assert!(bounds.contains(0.01));
        assert!(bounds.contains(10_000.0));
        assert!(!bounds.contains(10_000.01));
    }

    #[test]
    fn inclusive_bounds_include_both_ends() {
        let bounds = FloatBounds::inclusive(0.0, 1.0);
        assert!(bounds.contains(0.0));
        assert!(bounds.contains(1.0));
        assert!(!bounds.contains(1.000001));
    }

    #[test]
    fn performance_metric_parses_known_names_only() {
        assert_eq!(PerformanceMetric::parse("steals"), Some(PerformanceMetric::Steals));
        assert_eq!(PerformanceMetric::parse("turnovers"), None);
    }

    #[test]
    fn schema_variant_reports_its_type() {
        let schema = ParameterSchema::ArbitrageMode(ArbitrageModeSchema::default());
        assert_eq!(schema.strategy_type(), StrategyType::ArbitrageMode);
    }
}
