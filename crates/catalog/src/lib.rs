pub mod registry;
pub mod schema;

pub use registry::{StrategyTemplate, TemplateRegistry};
pub use schema::{
    ArbitrageModeSchema, FloatBounds, IntBounds, ParameterSchema, PerformanceMetric,
    PostGameSpikesSchema, RookieRisersSchema,
};
