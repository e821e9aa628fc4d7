//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Period-end closing configuration.
    #[serde(default)]
    pub closing: ClosingConfig,
    /// Per-account aggregation configuration.
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Closing configuration.
///
/// Describes the equity account that receives net income or loss when a
/// trial balance is closed.
#[derive(Debug, Clone, Deserialize)]
pub struct ClosingConfig {
    /// Account code of the closing equity account.
    #[serde(default = "default_equity_account_code")]
    pub equity_account_code: String,
    /// Display name of the closing equity account.
    #[serde(default = "default_equity_account_name")]
    pub equity_account_name: String,
    /// Description of the closing equity account.
    #[serde(default = "default_equity_account_description")]
    pub equity_account_description: String,
}

fn default_equity_account_code() -> String {
    "3900".to_string()
}

fn default_equity_account_name() -> String {
    "Retained Earnings".to_string()
}

fn default_equity_account_description() -> String {
    "Accumulated net income carried forward at period close".to_string()
}

impl Default for ClosingConfig {
    fn default() -> Self {
        Self {
            equity_account_code: default_equity_account_code(),
            equity_account_name: default_equity_account_name(),
            equity_account_description: default_equity_account_description(),
        }
    }
}

/// Aggregation configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AggregationConfig {
    /// Minimum number of accounts before per-account aggregation runs on the
    /// rayon thread pool instead of sequentially.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize {
    64
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl AggregationConfig {
    /// Returns true if `account_count` accounts should be aggregated in parallel.
    #[must_use]
    pub const fn should_parallelize(&self, account_count: usize) -> bool {
        account_count >= self.parallel_threshold
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_directive")]
    pub default_directive: String,
}

fn default_directive() -> String {
    "ledgerline=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_directive: default_directive(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `LEDGERLINE__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEDGERLINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
