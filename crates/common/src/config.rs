use crate::AccountLimits;

/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    /// Account-level ceilings used when the caller does not supply its own
    /// (e.g. the `admitctl` snapshot checker).
    pub account_limits: AccountLimits,

    /// Path of the strategy snapshot file consumed by `admitctl`.
    pub snapshot_path: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any malformed value.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let daily_spending_cap = optional_env("DAILY_SPENDING_CAP")
            .map(|v| {
                v.parse::<f64>().unwrap_or_else(|_| {
                    panic!("DAILY_SPENDING_CAP must be a number, got: '{v}'")
                })
            })
            .unwrap_or(1_000.0);

        let concurrency_ceiling = optional_env("CONCURRENCY_CEILING")
            .map(|v| {
                v.parse::<u32>().unwrap_or_else(|_| {
                    panic!("CONCURRENCY_CEILING must be an integer, got: '{v}'")
                })
            })
            .unwrap_or(10);

        Config {
            account_limits: AccountLimits {
                daily_spending_cap,
                concurrency_ceiling,
            },
            snapshot_path: optional_env("STRATEGY_SNAPSHOT_PATH")
                .unwrap_or_else(|| "config/strategies.toml".to_string()),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
