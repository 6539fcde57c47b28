use proptest::prelude::*;
use serde_json::{json, Value};

use admission::{validate_compatibility, validate_parameters};
use catalog::TemplateRegistry;
use common::{
    AccountLimits, BudgetAllocation, ParameterMap, RiskControls, StrategyConfig, StrategyType,
};

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,12}".prop_map(Value::from),
        proptest::collection::vec("[a-z]{0,8}".prop_map(Value::from), 0..4)
            .prop_map(Value::Array),
    ]
}

/// Maps with schema and non-schema keys bound to arbitrary JSON shapes.
fn arb_params() -> impl Strategy<Value = ParameterMap> {
    let keys = vec![
        "performanceThreshold",
        "priceLimit",
        "minGamesPlayed",
        "performanceMetrics",
        "timeWindow",
        "priceChangeThreshold",
        "priceDifferenceThreshold",
        "maxExecutionTime",
        "marketplaces",
        "legacyField",
    ];
    proptest::collection::hash_map(proptest::sample::select(keys), arb_value(), 0..8)
        .prop_map(|m| m.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

fn valid_params(ty: StrategyType) -> ParameterMap {
    let value = match ty {
        StrategyType::RookieRisers => json!({
            "performanceThreshold": 0.5,
            "priceLimit": 100.0,
            "minGamesPlayed": 5
        }),
        StrategyType::PostGameSpikes => json!({
            "performanceMetrics": ["points"],
            "timeWindow": 24,
            "priceChangeThreshold": 0.1
        }),
        StrategyType::ArbitrageMode => json!({
            "priceDifferenceThreshold": 0.05,
            "maxExecutionTime": 60,
            "marketplaces": ["nba-top-shot", "flowty"]
        }),
    };
    value.as_object().unwrap().clone()
}

fn make_strategy(idx: usize, ty: StrategyType, percentage: f64, daily: f64, trades: u32) -> StrategyConfig {
    StrategyConfig {
        id: format!("s{idx:02}"),
        template_id: format!("tpl-{}", ty.as_str().replace('_', "-")),
        strategy_type: ty,
        parameters: valid_params(ty),
        budget: BudgetAllocation { percentage, max_amount: 1_000.0, daily_limit: daily },
        risk_controls: RiskControls { max_concurrent_trades: trades, stop_loss_pct: None },
        is_active: true,
        updated_at: chrono::Utc::now(),
    }
}

proptest! {
    /// Parameter validation must never panic, whatever shape the stored
    /// configuration map has ended up in.
    #[test]
    fn parameter_validation_never_panics(
        ty_idx in 0usize..3,
        params in arb_params(),
    ) {
        let registry = TemplateRegistry::builtin();
        let ty = StrategyType::ALL[ty_idx];
        let result = validate_parameters(&registry, ty, &params).unwrap();
        // The parameter validator reports through errors only.
        prop_assert!(result.warnings.is_empty());
    }

    /// Compatibility findings depend only on the multiset of strategies,
    /// never on the order the caller supplied the snapshot in.
    #[test]
    fn compatibility_is_invariant_to_input_order(
        specs in proptest::collection::vec(
            (0usize..3, 0.0f64..0.8, 0.0f64..500.0, 0u32..5),
            0..6,
        ),
    ) {
        let registry = TemplateRegistry::builtin();
        let limits = AccountLimits { daily_spending_cap: 1_000.0, concurrency_ceiling: 10 };

        let forward: Vec<StrategyConfig> = specs
            .iter()
            .enumerate()
            .map(|(i, &(ty_idx, pct, daily, trades))| {
                make_strategy(i, StrategyType::ALL[ty_idx], pct, daily, trades)
            })
            .collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let first = validate_compatibility(&registry, &forward, &limits);
        let second = validate_compatibility(&registry, &reversed, &limits);
        prop_assert_eq!(first, second);
    }

    /// Rule 1 fires exactly when the budget percentages sum past 100%.
    #[test]
    fn budget_rule_matches_the_arithmetic(
        specs in proptest::collection::vec(
            (0usize..3, 0.0f64..0.7),
            1..5,
        ),
    ) {
        let registry = TemplateRegistry::builtin();
        let limits = AccountLimits { daily_spending_cap: f64::MAX, concurrency_ceiling: u32::MAX };

        let active: Vec<StrategyConfig> = specs
            .iter()
            .enumerate()
            .map(|(i, &(ty_idx, pct))| make_strategy(i, StrategyType::ALL[ty_idx], pct, 0.0, 0))
            .collect();
        let total: f64 = specs.iter().map(|&(_, pct)| pct).sum();

        let result = validate_compatibility(&registry, &active, &limits);
        let has_budget_error = result.errors.iter().any(|e| e.contains("budget allocation"));
        prop_assert_eq!(has_budget_error, total > 1.0 + 1e-9);
    }
}
