//! Application configuration management.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Revenue retention configuration.
    #[serde(default)]
    pub retention: RetentionConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Per-organization revenue retention rates.
///
/// The retention rate is the percentage of collected revenue an
/// organization keeps rather than remitting to the consolidated fund.
/// Rates are maintained here as a static lookup table keyed by
/// organization code; each revenue record copies the rate in force at
/// creation time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetentionConfig {
    /// Retention percentage per organization code (e.g., `MOF = 5`).
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FISCORA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_retention_config_defaults_empty() {
        let retention = RetentionConfig::default();
        assert!(retention.rates.is_empty());
    }

    #[test]
    fn test_retention_rates_deserialize() {
        let source = r#"
            [rates]
            MOF = "5"
            GRA = "12.5"
        "#;
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .expect("valid toml");
        let retention: RetentionConfig = cfg.try_deserialize().expect("valid retention config");

        assert_eq!(retention.rates.get("MOF"), Some(&dec!(5)));
        assert_eq!(retention.rates.get("GRA"), Some(&dec!(12.5)));
    }
}
