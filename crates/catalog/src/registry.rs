use serde::{Deserialize, Serialize};
use tracing::info;

use common::{Error, Result, StrategyType};

use crate::schema::{
    ArbitrageModeSchema, ParameterSchema, PostGameSpikesSchema, RookieRisersSchema,
};

/// Canonical definition of a strategy type: identity, display name, and the
/// parameter schema for configurations of that type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategyTemplate {
    pub id: String,
    #[serde(rename = "type")]
    pub strategy_type: StrategyType,
    pub name: String,
    pub schema: ParameterSchema,
}

/// Process-wide catalog of strategy templates. Built once at startup,
/// read-only afterwards; safe to share across threads without locking.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<StrategyTemplate>,
}

impl TemplateRegistry {
    /// The fixed built-in catalog, in registration order.
    pub fn builtin() -> Self {
        let templates = vec![
            StrategyTemplate {
                id: "tpl-rookie-risers".to_string(),
                strategy_type: StrategyType::RookieRisers,
                name: "Rookie Risers".to_string(),
                schema: ParameterSchema::RookieRisers(RookieRisersSchema::default()),
            },
            StrategyTemplate {
                id: "tpl-post-game-spikes".to_string(),
                strategy_type: StrategyType::PostGameSpikes,
                name: "Post-Game Spikes".to_string(),
                schema: ParameterSchema::PostGameSpikes(PostGameSpikesSchema::default()),
            },
            StrategyTemplate {
                id: "tpl-arbitrage-mode".to_string(),
                strategy_type: StrategyType::ArbitrageMode,
                name: "Arbitrage Mode".to_string(),
                schema: ParameterSchema::ArbitrageMode(ArbitrageModeSchema::default()),
            },
        ];

        for template in &templates {
            info!(id = %template.id, ty = %template.strategy_type, "Registered template");
        }

        Self { templates }
    }

    /// Look up the template for a strategy type.
    pub fn get(&self, ty: StrategyType) -> Result<&StrategyTemplate> {
        self.templates
            .iter()
            .find(|t| t.strategy_type == ty)
            .ok_or_else(|| Error::UnknownStrategyType(ty.to_string()))
    }

    /// All templates in registration order, for UI enumeration.
    pub fn list(&self) -> &[StrategyTemplate] {
        &self.templates
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
