//! Warm-up fault injection configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chaos::{
    ChaosConfigError, DEFAULT_DELAY, DEFAULT_FAILURES, DEFAULT_SLOW_FAILURES, WarmupPolicy,
};

/// Fault injection for `GET /items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosAppConfig {
    /// Wrap the item store with the warm-up fault injector
    #[serde(default)]
    pub enabled: bool,

    /// Calls that are delayed and then fail
    #[serde(default = "default_slow_failures")]
    pub slow_failures: u64,

    /// Calls that fail in total, slow ones included
    #[serde(default = "default_failures")]
    pub failures: u64,

    /// Delay before a slow failure, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

const fn default_slow_failures() -> u64 {
    DEFAULT_SLOW_FAILURES
}

const fn default_failures() -> u64 {
    DEFAULT_FAILURES
}

#[allow(clippy::cast_possible_truncation)]
const fn default_delay_ms() -> u64 {
    DEFAULT_DELAY.as_millis() as u64
}

impl Default for ChaosAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            slow_failures: default_slow_failures(),
            failures: default_failures(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl ChaosAppConfig {
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Build the warm-up policy described by this config
    pub const fn to_policy(&self) -> Result<WarmupPolicy, ChaosConfigError> {
        WarmupPolicy::new(self.slow_failures, self.failures, self.delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_yields_default_policy() {
        let policy = ChaosAppConfig::default().to_policy().unwrap();
        assert_eq!(policy, WarmupPolicy::default());
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let config = ChaosAppConfig {
            slow_failures: 3,
            failures: 1,
            ..ChaosAppConfig::default()
        };
        assert!(config.to_policy().is_err());
    }

    #[test]
    fn delay_is_in_milliseconds() {
        let config = ChaosAppConfig {
            delay_ms: 250,
            ..ChaosAppConfig::default()
        };
        assert_eq!(config.delay(), Duration::from_millis(250));
    }
}
