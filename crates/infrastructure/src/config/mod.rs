//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and logging settings
//! - `chaos`: warm-up fault injection for the list endpoint
//! - `events`: in-process catalog event publishing
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `CATALOG_*` environment variables. Nested keys use a double
//! underscore, e.g. `CATALOG_SERVER__PORT=8080` or `CATALOG_CHAOS__ENABLED=true`.

mod chaos;
mod events;
mod server;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use chaos::ChaosAppConfig;
pub use events::EventsAppConfig;
pub use server::ServerConfig;

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "CATALOG";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment; `None` behaves like development
    #[serde(default)]
    pub environment: Option<Environment>,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub chaos: ChaosAppConfig,

    #[serde(default)]
    pub events: EventsAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file plus the environment
    pub fn load_from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Effective environment, defaulting to development
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        self.environment() == Environment::Production
    }

    /// Settings that are legal but probably unintended
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.is_production() && self.chaos.enabled {
            warnings.push(
                "Chaos fault injection is enabled in production; the first list calls will fail"
                    .to_string(),
            );
        }
        if self.is_production() && self.server.allowed_origins.is_empty() {
            warnings.push("No CORS origins configured; all origins are allowed".to_string());
        }
        if self.chaos.enabled && self.chaos.slow_failures > self.chaos.failures {
            warnings.push(format!(
                "chaos.slow_failures ({}) exceeds chaos.failures ({})",
                self.chaos.slow_failures, self.chaos.failures
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::telemetry::LogFormat;

    #[test]
    fn environment_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
        assert_eq!(AppConfig::default().environment(), Environment::Development);
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn environment_from_str_accepts_short_and_mixed_case() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn defaults_disable_chaos_and_enable_events() {
        let config = AppConfig::default();
        assert!(!config.chaos.enabled);
        assert!(config.events.enabled);
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn load_from_file_reads_all_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
environment = "production"

[server]
host = "127.0.0.1"
port = 8080
log_format = "json"
allowed_origins = ["https://shop.example"]

[chaos]
enabled = true
delay_ms = 50

[events]
channel_capacity = 16
"#
        )
        .unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.server.allowed_origins, vec!["https://shop.example"]);
        assert!(config.chaos.enabled);
        assert_eq!(config.chaos.delay_ms, 50);
        assert_eq!(config.chaos.failures, 4);
        assert_eq!(config.events.channel_capacity, 16);
        assert!(config.events.enabled);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_file(&dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn chaos_in_production_is_warned_about() {
        let config = AppConfig {
            environment: Some(Environment::Production),
            chaos: ChaosAppConfig {
                enabled: true,
                ..ChaosAppConfig::default()
            },
            server: ServerConfig {
                allowed_origins: vec!["https://shop.example".to_string()],
                ..ServerConfig::default()
            },
            ..AppConfig::default()
        };
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Chaos"));
    }

    #[test]
    fn inverted_chaos_thresholds_are_warned_about() {
        let config = AppConfig {
            chaos: ChaosAppConfig {
                enabled: true,
                slow_failures: 5,
                failures: 2,
                ..ChaosAppConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.warnings().iter().any(|w| w.contains("slow_failures")));
    }
}
