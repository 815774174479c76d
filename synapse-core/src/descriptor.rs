use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-handler invocation timeout when a descriptor omits one.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Static capability descriptor for one domain handler.
///
/// Descriptors are loaded at startup (from code or from a TOML handler
/// table) and are immutable once the registry is frozen. Lower `priority`
/// values are tried first when confidences tie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerDescriptor {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub intents: Vec<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl HandlerDescriptor {
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            priority: 0,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            intents: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_intents(mut self, intents: Vec<String>) -> Self {
        self.intents = intents;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn declares_intent(&self, intent: &str) -> bool {
        self.intents.iter().any(|i| i == intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let desc = HandlerDescriptor::new("financial", "Financial Intelligence Agent");
        assert_eq!(desc.tag, "financial");
        assert_eq!(desc.priority, 0);
        assert_eq!(desc.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
        assert!(desc.intents.is_empty());
    }

    #[test]
    fn test_descriptor_builders() {
        let desc = HandlerDescriptor::new("inventory", "Inventory Agent")
            .with_priority(2)
            .with_timeout(Duration::from_secs(5))
            .with_intents(vec!["reorder".to_string(), "stock_alerts".to_string()]);
        assert_eq!(desc.priority, 2);
        assert_eq!(desc.timeout_ms, 5_000);
        assert!(desc.declares_intent("reorder"));
        assert!(!desc.declares_intent("forecast"));
    }

    #[test]
    fn test_descriptor_from_toml() {
        let desc: HandlerDescriptor = toml_like_json(
            r#"{"tag": "strategic", "name": "CEO Agent", "priority": 3}"#,
        );
        assert_eq!(desc.tag, "strategic");
        assert_eq!(desc.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    fn toml_like_json(s: &str) -> HandlerDescriptor {
        serde_json::from_str(s).unwrap()
    }
}
