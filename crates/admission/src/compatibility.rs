//! Joint admissibility of a user's active strategy set.
//!
//! Rules are evaluated in a fixed order and all of them run; findings
//! accumulate rather than short-circuiting. Within rule 4 strategies are
//! visited in id order and rule 5 follows the type registration order, so the
//! output depends only on the input multiset, never on the order the caller
//! happened to supply the snapshot in.

use tracing::{debug, warn};

use catalog::TemplateRegistry;
use common::{AccountLimits, StrategyConfig, StrategyType, ValidationResult};

use crate::parameters::validate_parameters;

/// Sums like 0.3 + 0.4 + 0.3 must count as exactly 100%.
const BUDGET_SUM_TOLERANCE: f64 = 1e-9;

/// Validate that one user's active strategies are jointly admissible under
/// the account-level ceilings. `active` is the caller's snapshot; the caller
/// must serialize validate-then-persist per user to avoid check-then-act
/// races across snapshots.
pub fn validate_compatibility(
    registry: &TemplateRegistry,
    active: &[StrategyConfig],
    limits: &AccountLimits,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    // Rule 1: budget percentage conservation.
    let total_pct: f64 = active.iter().map(|s| s.budget.percentage).sum();
    if total_pct > 1.0 + BUDGET_SUM_TOLERANCE {
        result.push_error(format!(
            "Combined budget allocation is {:.0}% of available funds, {:.0}% over the limit",
            total_pct * 100.0,
            (total_pct - 1.0) * 100.0
        ));
    }

    // Rule 2: daily spend ceiling.
    let total_daily: f64 = active.iter().map(|s| s.budget.daily_limit).sum();
    if total_daily > limits.daily_spending_cap {
        result.push_error(format!(
            "Combined daily limits total ${total_daily:.2}, exceeding the account \
             daily spending cap of ${:.2}",
            limits.daily_spending_cap
        ));
    }

    // Rule 3: concurrency ceiling.
    let total_trades: u64 = active
        .iter()
        .map(|s| u64::from(s.risk_controls.max_concurrent_trades))
        .sum();
    if total_trades > u64::from(limits.concurrency_ceiling) {
        result.push_error(format!(
            "Combined concurrent-trade limit is {total_trades}, exceeding the account \
             ceiling of {}",
            limits.concurrency_ceiling
        ));
    }

    // Rule 4: re-validate each strategy's parameters. Stored parameters may
    // have been mutated outside this engine, so a stale-invalid strategy is
    // surfaced here instead of silently admitted. Visit in id order.
    let mut by_id: Vec<&StrategyConfig> = active.iter().collect();
    by_id.sort_by(|a, b| a.id.cmp(&b.id));
    for strategy in by_id {
        match validate_parameters(registry, strategy.strategy_type, &strategy.parameters) {
            Ok(revalidation) => {
                for error in revalidation.errors {
                    result.push_error(format!(
                        "Strategy {} ({}): {error}",
                        strategy.id, strategy.strategy_type
                    ));
                }
            }
            Err(err) => {
                result.push_error(format!("Strategy {}: {err}", strategy.id));
            }
        }
    }

    // Rule 5: duplicate exposure to the same signal is allowed but flagged.
    for ty in StrategyType::ALL {
        let count = active.iter().filter(|s| s.strategy_type == ty).count();
        if count >= 2 {
            result.push_warning(format!(
                "{count} active strategies share type '{ty}' (duplicate exposure to the \
                 same signal)"
            ));
        }
    }

    if result.is_valid() {
        debug!(
            strategies = active.len(),
            warnings = result.warnings.len(),
            "Active set is jointly admissible"
        );
    } else {
        warn!(
            strategies = active.len(),
            errors = result.errors.len(),
            "Active set failed compatibility validation"
        );
    }

    result
}

// ─── Tests ────────────────────────────────────────────────────────────────────
