//! Backend configuration.

use std::time::Duration;

/// Settings for an [`InMemoryApi`](crate::InMemoryApi).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    /// Path prefix the routes live under (e.g. `api`).
    pub base_path: String,
    /// Delay applied to every response after it has been computed.
    pub latency: Duration,
    /// Start with the demo catalog instead of empty tables.
    pub seed: bool,
}

impl MockConfig {
    /// Default configuration: seeded, no latency, `api` base path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base path.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into().trim_matches('/').to_string();
        self
    }

    /// Set the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Start empty or seeded.
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            base_path: "api".to_string(),
            latency: Duration::ZERO,
            seed: true,
        }
    }
}
