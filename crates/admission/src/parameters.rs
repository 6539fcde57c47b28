//! Per-strategy parameter validation.
//!
//! Validation is exhaustive: every violated field is collected into one
//! `ValidationResult` so the dashboard can show all problems at once. Fields
//! not declared in the schema are ignored, which lets configurations written
//! by newer dashboard versions load on older engines.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use catalog::{
    ArbitrageModeSchema, FloatBounds, IntBounds, ParameterSchema, PerformanceMetric,
    PostGameSpikesSchema, RookieRisersSchema, TemplateRegistry,
};
use common::{ParameterMap, Result, StrategyType, ValidationResult};

/// Validate one strategy configuration's parameters against the schema for
/// its declared type. Fails only with `UnknownStrategyType`; every schema
/// violation is reported through the returned `ValidationResult`.
pub fn validate_parameters(
    registry: &TemplateRegistry,
    ty: StrategyType,
    parameters: &ParameterMap,
) -> Result<ValidationResult> {
    let template = registry.get(ty)?;
    let mut result = ValidationResult::ok();

    match &template.schema {
        ParameterSchema::RookieRisers(schema) => {
            check_rookie_risers(schema, parameters, &mut result)
        }
        ParameterSchema::PostGameSpikes(schema) => {
            check_post_game_spikes(schema, parameters, &mut result)
        }
        ParameterSchema::ArbitrageMode(schema) => {
            check_arbitrage_mode(schema, parameters, &mut result)
        }
    }

    debug!(ty = %ty, errors = result.errors.len(), "Validated strategy parameters");
    Ok(result)
}

// ─── Per-type checks ──────────────────────────────────────────────────────────

fn check_rookie_risers(
    schema: &RookieRisersSchema,
    params: &ParameterMap,
    result: &mut ValidationResult,
) {
    if let Some(v) = number_field(params, "performanceThreshold", result) {
        check_float("performanceThreshold", v, &schema.performance_threshold, result);
    }
    if let Some(v) = number_field(params, "priceLimit", result) {
        check_float("priceLimit", v, &schema.price_limit, result);
    }
    if let Some(v) = integer_field(params, "minGamesPlayed", result) {
        check_int("minGamesPlayed", v, &schema.min_games_played, result);
    }
}

fn check_post_game_spikes(
    schema: &PostGameSpikesSchema,
    params: &ParameterMap,
    result: &mut ValidationResult,
) {
    if let Some(metrics) = string_list_field(params, "performanceMetrics", result) {
        if metrics.is_empty() {
            result.push_error("Field `performanceMetrics` must list at least one metric");
        }
        for metric in &metrics {
            if PerformanceMetric::parse(metric).is_none() {
                result.push_error(format!(
                    "Field `performanceMetrics` contains unknown metric '{metric}' \
                     (allowed: points, rebounds, assists, steals, blocks)"
                ));
            }
        }
    }
    if let Some(v) = integer_field(params, "timeWindow", result) {
        check_int("timeWindow", v, &schema.time_window, result);
    }
    if let Some(v) = number_field(params, "priceChangeThreshold", result) {
        check_float("priceChangeThreshold", v, &schema.price_change_threshold, result);
    }
}

fn check_arbitrage_mode(
    schema: &ArbitrageModeSchema,
    params: &ParameterMap,
    result: &mut ValidationResult,
) {
    if let Some(v) = number_field(params, "priceDifferenceThreshold", result) {
        check_float("priceDifferenceThreshold", v, &schema.price_difference_threshold, result);
    }
    if let Some(v) = integer_field(params, "maxExecutionTime", result) {
        check_int("maxExecutionTime", v, &schema.max_execution_time, result);
    }
    if let Some(marketplaces) = string_list_field(params, "marketplaces", result) {
        let distinct: HashSet<&str> = marketplaces.iter().map(String::as_str).collect();
        if distinct.len() < marketplaces.len() {
            result.push_error("Field `marketplaces` contains duplicate entries");
        }
        if distinct.len() < schema.min_marketplaces {
            result.push_error(format!(
                "Field `marketplaces` must list at least {} distinct marketplaces",
                schema.min_marketplaces
            ));
        }
    }
}

// ─── Field readers ────────────────────────────────────────────────────────────
//
// Each reader reports presence and shape problems itself and returns `None`
// so the range check is skipped for a field that is already in error.

fn number_field(params: &ParameterMap, key: &str, result: &mut ValidationResult) -> Option<f64> {
    match params.get(key) {
        None => {
            result.push_error(format!("Missing required field `{key}`"));
            None
        }
        Some(value) => match value.as_f64() {
            Some(n) => Some(n),
            None => {
                result.push_error(format!("Field `{key}` must be a number"));
                None
            }
        },
    }
}

fn integer_field(params: &ParameterMap, key: &str, result: &mut ValidationResult) -> Option<i64> {
    match params.get(key) {
        None => {
            result.push_error(format!("Missing required field `{key}`"));
            None
        }
        Some(value) => match value.as_i64() {
            Some(n) => Some(n),
            None => {
                result.push_error(format!("Field `{key}` must be an integer"));
                None
            }
        },
    }
}

fn string_list_field(
    params: &ParameterMap,
    key: &str,
    result: &mut ValidationResult,
) -> Option<Vec<String>> {
    let value = match params.get(key) {
        None => {
            result.push_error(format!("Missing required field `{key}`"));
            return None;
        }
        Some(v) => v,
    };

    let items = match value.as_array() {
        Some(items) => items,
        None => {
            result.push_error(format!("Field `{key}` must be a list of strings"));
            return None;
        }
    };

    let mut strings = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => strings.push(s.clone()),
            _ => {
                result.push_error(format!("Field `{key}` must be a list of strings"));
                return None;
            }
        }
    }
    Some(strings)
}

fn check_float(key: &str, value: f64, bounds: &FloatBounds, result: &mut ValidationResult) {
    if !bounds.contains(value) {
        result.push_error(format!("Field `{key}` must be {}", bounds.describe()));
    }
}

fn check_int(key: &str, value: i64, bounds: &IntBounds, result: &mut ValidationResult) {
    if !bounds.contains(value) {
        result.push_error(format!("Field `{key}` must be {}", bounds.describe()));
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
