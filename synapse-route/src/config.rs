use crate::aggregator::MergePolicy;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use synapse_core::{HandlerDescriptor, Result, RouteError};

/// Routing policy knobs.
///
/// All values are configurable defaults, not contracts: the accept
/// threshold, retry budget, and merge policy were reconstructed from the
/// original system's prose, so deployments are expected to tune them.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// A Success at or above this confidence is accepted outright.
    pub accept_threshold: f64,
    /// Classifier floor: candidates scoring below this are dropped.
    pub min_confidence: f64,
    /// Maximum failed attempts recorded per handler before escalation.
    /// 0 is treated as 1: every candidate gets at least one attempt.
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_multiplier: f32,
    pub merge_policy: MergePolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 0.8,
            min_confidence: 0.1,
            max_retries: 2,
            initial_backoff_ms: 250,
            max_backoff_ms: 5_000,
            backoff_multiplier: 2.0,
            merge_policy: MergePolicy::PrimaryWithSupplements,
        }
    }
}

impl RouterConfig {
    #[must_use]
    pub fn with_accept_threshold(mut self, accept_threshold: f64) -> Self {
        self.accept_threshold = accept_threshold;
        self
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff_ms = initial_backoff.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff_ms = max_backoff.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_backoff_multiplier(mut self, backoff_multiplier: f32) -> Self {
        self.backoff_multiplier = backoff_multiplier;
        self
    }

    #[must_use]
    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

/// Startup configuration file: `[router]` policy plus a `[[handlers]]`
/// descriptor table. Handler implementations are still wired in code; the
/// file only carries the static capability metadata.
///
/// ```toml
/// [router]
/// accept_threshold = 0.8
/// max_retries = 2
///
/// [[handlers]]
/// tag = "financial"
/// name = "Financial Intelligence Agent"
/// priority = 1
/// timeout_ms = 5000
/// intents = ["revenue_report", "cash_balance"]
/// ```
#[derive(Debug, Deserialize)]
pub struct RouterConfigFile {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub handlers: Vec<HandlerDescriptor>,
}

impl RouterConfigFile {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| RouteError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
