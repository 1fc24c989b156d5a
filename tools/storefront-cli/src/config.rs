//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_data::{BackoffStrategy, RetryPolicy};
use storefront_mock::MockConfig;

use crate::logging::LogFormat;

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// API client settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// In-memory backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Retry settings.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Backend settings in the form the mock expects.
    pub fn mock_config(&self) -> MockConfig {
        MockConfig::new()
            .with_base_path(self.api.base_path.clone())
            .with_latency(Duration::from_millis(self.backend.latency_ms))
            .with_seed(self.backend.seed)
    }

    /// Retry policy for the API client.
    pub fn retry_policy(&self) -> RetryPolicy {
        if self.retry.max_attempts == 0 {
            return RetryPolicy::none();
        }
        RetryPolicy::new(self.retry.max_attempts).with_backoff(BackoffStrategy::Exponential {
            base: Duration::from_millis(self.retry.backoff_ms),
            max: Duration::from_millis(self.retry.backoff_ms.saturating_mul(8)),
        })
    }
}

/// API client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Path prefix of every route.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Per-request timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_base_path() -> String {
    "api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            timeout_ms: None,
        }
    }
}

/// In-memory backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Start with the demo catalog.
    #[serde(default = "default_true")]
    pub seed: bool,

    /// Simulated latency per request in milliseconds.
    #[serde(default)]
    pub latency_ms: u64,
}

fn default_true() -> bool {
    true
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            seed: true,
            latency_ms: 0,
        }
    }
}

/// Retry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying.
    #[serde(default)]
    pub max_attempts: u32,

    /// Initial backoff in milliseconds.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_backoff_ms() -> u64 {
    50
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `warn` or `storefront_store=debug`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Line format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::Human,
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[api]
base_path = "api"
# timeout_ms = 2000

[backend]
seed = true
latency_ms = 0

[retry]
# Retries after the first attempt for reads failing with 5xx or transport errors
max_attempts = 0
backoff_ms = 50

[logging]
# Any tracing filter directive; RUST_LOG takes precedence
level = "warn"
# "human" or "json"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let parsed: StorefrontConfig = toml::from_str(
            r#"
            [backend]
            latency_ms = 250

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.backend.latency_ms, 250);
        assert!(parsed.backend.seed);
        assert_eq!(parsed.logging.format, LogFormat::Json);
        assert_eq!(parsed.api.base_path, "api");
        assert_eq!(parsed.mock_config().latency, Duration::from_millis(250));
    }

    #[test]
    fn test_json_config() {
        let parsed: StorefrontConfig =
            serde_json::from_str(r#"{ "api": { "base_path": "shop" }, "retry": { "max_attempts": 2 } }"#)
                .unwrap();
        assert_eq!(parsed.mock_config().base_path, "shop");
        assert_eq!(parsed.retry_policy().max_attempts, 2);
    }

    #[test]
    fn test_zero_attempts_disables_retry() {
        assert_eq!(StorefrontConfig::default().retry_policy(), RetryPolicy::none());
    }
}
