//! # Configuration
//!
//! Layered runtime configuration.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. An optional file (`--config`), any format the `config` crate reads
//! 3. Environment variables prefixed `FUEL_LOCATOR`, nested with `__`
//!    (e.g. `FUEL_LOCATOR__SERVER__PORT=8080`)
//!
//! # Examples
//!
//! ```
//! use fuel_locator::config::AppConfig;
//!
//! let config = AppConfig::load(None).unwrap();
//! assert!(config.ranking.default_radius_meters <= config.ranking.max_radius_meters);
//! ```

use crate::application::services::RankingConfig;
use crate::domain::value_objects::SearchRadius;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FUEL_LOCATOR";

/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    /// The configuration was read but is not usable.
    #[error("invalid configuration: {field}: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigurationError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Station directory settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; without one the directory is kept in memory.
    #[serde(default)]
    pub url: Option<String>,
    /// Pool size.
    pub max_connections: u32,
}

/// Ranking settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankingSettings {
    /// Radius used when a query gives none, in metres.
    pub default_radius_meters: f64,
    /// Largest radius a query may request, in metres.
    pub max_radius_meters: f64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Station directory.
    pub database: DatabaseConfig,
    /// Ranking.
    pub ranking: RankingSettings,
    /// Logging.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from defaults, an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Load` if the file cannot be read or a
    /// value has the wrong type, and `ConfigurationError::Invalid` if the
    /// values are inconsistent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut builder = defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        Self::build(builder.add_source(environment()))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigurationError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Invalid` for a non-positive radius, a
    /// default radius above the maximum, or an empty pool.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.ranking_config()?;
        if self.database.max_connections == 0 {
            return Err(ConfigurationError::invalid(
                "database.max_connections",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Returns the ranking configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Invalid` if a radius is not positive or
    /// the default exceeds the maximum.
    pub fn ranking_config(&self) -> Result<RankingConfig, ConfigurationError> {
        let default_radius = SearchRadius::new(self.ranking.default_radius_meters).map_err(|e| {
            ConfigurationError::invalid("ranking.default_radius_meters", e.to_string())
        })?;
        let max_radius = SearchRadius::new(self.ranking.max_radius_meters)
            .map_err(|e| ConfigurationError::invalid("ranking.max_radius_meters", e.to_string()))?;

        RankingConfig::new(default_radius, max_radius)
            .map_err(|e| ConfigurationError::invalid("ranking.default_radius_meters", e.to_string()))
    }

    /// Returns the `host:port` the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("database.max_connections", 5)?
        .set_default("ranking.default_radius_meters", SearchRadius::DEFAULT.meters())?
        .set_default("ranking.max_radius_meters", SearchRadius::DEFAULT_MAX.meters())?
        .set_default("logging.level", "info")?
        .set_default("logging.json", false)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::collections::HashMap;

    fn from_env(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigurationError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::build(defaults().unwrap().add_source(environment().source(Some(map))))
    }

    #[test]
    fn defaults_only() {
        let config = from_env(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.ranking.default_radius_meters, 15_000.0);
        assert_eq!(config.ranking.max_radius_meters, 100_000.0);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn environment_overrides() {
        let config = from_env(&[
            ("FUEL_LOCATOR__SERVER__PORT", "8080"),
            ("FUEL_LOCATOR__DATABASE__URL", "postgres://localhost/fuel"),
            ("FUEL_LOCATOR__RANKING__DEFAULT_RADIUS_METERS", "5000"),
            ("FUEL_LOCATOR__LOGGING__JSON", "true"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/fuel")
        );
        assert_eq!(config.ranking.default_radius_meters, 5_000.0);
        assert!(config.logging.json);
    }

    #[test]
    fn file_then_environment() {
        let file = r#"
            [server]
            port = 9000

            [ranking]
            max_radius_meters = 40000.0
        "#;
        let map = HashMap::from([(
            "FUEL_LOCATOR__SERVER__PORT".to_string(),
            "9100".to_string(),
        )]);
        let config = AppConfig::build(
            defaults()
                .unwrap()
                .add_source(File::from_str(file, FileFormat::Toml))
                .add_source(environment().source(Some(map))),
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.ranking.max_radius_meters, 40_000.0);
    }

    #[test]
    fn default_above_max_is_rejected() {
        let err = from_env(&[
            ("FUEL_LOCATOR__RANKING__DEFAULT_RADIUS_METERS", "50000"),
            ("FUEL_LOCATOR__RANKING__MAX_RADIUS_METERS", "20000"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::Invalid { .. }));
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let err = from_env(&[("FUEL_LOCATOR__RANKING__DEFAULT_RADIUS_METERS", "0")]).unwrap_err();
        assert!(err.to_string().contains("ranking.default_radius_meters"));
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = from_env(&[("FUEL_LOCATOR__DATABASE__MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(err.to_string().contains("max_connections"));
    }

    #[test]
    fn wrong_type_is_load_error() {
        let err = from_env(&[("FUEL_LOCATOR__SERVER__PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigurationError::Load(_)));
    }

    #[test]
    fn ranking_config_conversion() {
        let config = from_env(&[]).unwrap();
        let ranking = config.ranking_config().unwrap();
        assert_eq!(ranking, RankingConfig::default());
    }
}
