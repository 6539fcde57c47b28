pub mod compatibility;
pub mod parameters;

pub use compatibility::validate_compatibility;
pub use parameters::validate_parameters;

use common::{AccountLimits, ParameterMap, Result, StrategyConfig, StrategyType, ValidationResult};
use catalog::{StrategyTemplate, TemplateRegistry};

/// The admission-control facade the strategy-management API talks to.
///
/// Both validators are pure functions of their arguments plus the read-only
/// template registry: no I/O, no internal locking, freely callable from
/// concurrent requests. The caller is responsible for serializing the
/// read-active-set → validate → persist-activation sequence per user; the
/// engine only answers for the snapshot it is given.
pub struct AdmissionEngine {
    registry: TemplateRegistry,
}

impl AdmissionEngine {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// All known templates in registration order, for UI enumeration.
    pub fn templates(&self) -> &[StrategyTemplate] {
        self.registry.list()
    }

    /// Validate one strategy's parameters against its type's schema.
    /// Fails only when `ty` is absent from the catalog.
    pub fn validate_parameters(
        &self,
        ty: StrategyType,
        parameters: &ParameterMap,
    ) -> Result<ValidationResult> {
        parameters::validate_parameters(&self.registry, ty, parameters)
    }

    /// Validate that a user's active strategies are jointly admissible.
    pub fn validate_compatibility(
        &self,
        active: &[StrategyConfig],
        limits: &AccountLimits,
    ) -> ValidationResult {
        compatibility::validate_compatibility(&self.registry, active, limits)
    }

    /// The Inactive → Active gate: the candidate passes alone, and the
    /// active set that would result from admitting it passes jointly.
    pub fn admit(
        &self,
        candidate: &StrategyConfig,
        current_active: &[StrategyConfig],
        limits: &AccountLimits,
    ) -> Result<ValidationResult> {
        let result = self.validate_parameters(candidate.strategy_type, &candidate.parameters)?;
        if !result.is_valid() {
            // Gate (a) failed; compatibility would only repeat the findings.
            return Ok(result);
        }

        let mut hypothetical: Vec<StrategyConfig> = current_active.to_vec();
        hypothetical.push(candidate.clone());
        Ok(self.validate_compatibility(&hypothetical, limits))
    }
}

impl Default for AdmissionEngine {
    fn default() -> Self {
        Self::new(TemplateRegistry::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{BudgetAllocation, RiskControls};
    use serde_json::json;

    fn engine() -> AdmissionEngine {
        AdmissionEngine::default()
    }

    fn limits() -> AccountLimits {
        AccountLimits { daily_spending_cap: 1_000.0, concurrency_ceiling: 10 }
    }

    fn rookie(percentage: f64) -> StrategyConfig {
        StrategyConfig::new(
            "tpl-rookie-risers",
            StrategyType::RookieRisers,
            json!({
                "performanceThreshold": 0.6,
                "priceLimit": 150.0,
                "minGamesPlayed": 8
            })
            .as_object()
            .unwrap()
            .clone(),
            BudgetAllocation { percentage, max_amount: 500.0, daily_limit: 100.0 },
            RiskControls { max_concurrent_trades: 2, stop_loss_pct: Some(0.05) },
        )
    }

    #[test]
    fn admit_accepts_a_valid_candidate_into_a_roomy_set() {
        let result = engine().admit(&rookie(0.3), &[rookie(0.3)], &limits()).unwrap();
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);
        // Two rookie_risers in the hypothetical set: overlap warning expected.
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn admit_rejects_on_parameter_failure_before_compatibility() {
        let mut candidate = rookie(0.3);
        candidate.parameters.remove("priceLimit");
        let result = engine().admit(&candidate, &[], &limits()).unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.errors, vec!["Missing required field `priceLimit`".to_string()]);
    }

    #[test]
    fn admit_rejects_when_the_hypothetical_set_overcommits_budget() {
        let result = engine().admit(&rookie(0.6), &[rookie(0.6)], &limits()).unwrap();
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("budget allocation"));
    }

    #[test]
    fn templates_are_listed_in_registration_order() {
        let types: Vec<StrategyType> =
            engine().templates().iter().map(|t| t.strategy_type).collect();
        assert_eq!(types, StrategyType::ALL.to_vec());
    }
}
