use crate::{Handler, HandlerDescriptor, RouteError, Result, UNKNOWN_TAG};
use std::collections::HashMap;
use std::sync::Arc;

/// One registered handler: its static descriptor plus the capability
/// implementation invoked for its tag.
#[derive(Clone)]
pub struct RegistryEntry {
    pub descriptor: HandlerDescriptor,
    pub handler: Arc<dyn Handler>,
}

/// Immutable tag → handler mapping, built once at startup.
///
/// The registry is the only state shared between concurrent dispatchers,
/// and it is frozen at build time: concurrent reads need no locking.
pub struct HandlerRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl HandlerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder { entries: HashMap::new() }
    }

    pub fn get(&self, tag: &str) -> Option<&RegistryEntry> {
        self.entries.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Registry priority for a tag; unregistered tags sort last.
    pub fn priority_of(&self, tag: &str) -> i32 {
        self.entries.get(tag).map(|e| e.descriptor.priority).unwrap_or(i32::MAX)
    }

    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.entries.keys().cloned().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`HandlerRegistry`]; duplicate and reserved tags are
/// rejected at registration time.
pub struct RegistryBuilder {
    entries: HashMap<String, RegistryEntry>,
}

impl RegistryBuilder {
    pub fn register(
        mut self,
        descriptor: HandlerDescriptor,
        handler: Arc<dyn Handler>,
    ) -> Result<Self> {
        if descriptor.tag == UNKNOWN_TAG {
            return Err(RouteError::Config(format!(
                "Tag '{UNKNOWN_TAG}' is reserved for the classification sentinel"
            )));
        }
        if self.entries.contains_key(&descriptor.tag) {
            return Err(RouteError::Config(format!("Duplicate handler tag: {}", descriptor.tag)));
        }
        self.entries
            .insert(descriptor.tag.clone(), RegistryEntry { descriptor, handler });
        Ok(self)
    }

    pub fn build(self) -> Arc<HandlerRegistry> {
        Arc::new(HandlerRegistry { entries: self.entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandlerResponse, Query};
    use async_trait::async_trait;
    use serde_json::json;

    struct StubHandler {
        tag: String,
    }

    impl StubHandler {
        fn arc(tag: &str) -> Arc<dyn Handler> {
            Arc::new(Self { tag: tag.to_string() })
        }
    }

    #[async_trait]
    impl Handler for StubHandler {
        fn tag(&self) -> &str {
            &self.tag
        }

        fn description(&self) -> &str {
            "stub"
        }

        async fn invoke(&self, _query: &Query) -> Result<HandlerResponse> {
            Ok(HandlerResponse::new(json!(null)))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = HandlerRegistry::builder()
            .register(
                HandlerDescriptor::new("financial", "Financial Agent").with_priority(1),
                StubHandler::arc("financial"),
            )
            .unwrap()
            .register(
                HandlerDescriptor::new("inventory", "Inventory Agent").with_priority(2),
                StubHandler::arc("inventory"),
            )
            .unwrap()
            .build();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("financial"));
        assert!(!registry.contains("strategic"));
        assert_eq!(registry.priority_of("inventory"), 2);
        assert_eq!(registry.priority_of("missing"), i32::MAX);
        assert_eq!(registry.tags(), vec!["financial".to_string(), "inventory".to_string()]);
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let result = HandlerRegistry::builder()
            .register(HandlerDescriptor::new("financial", "A"), StubHandler::arc("financial"))
            .unwrap()
            .register(HandlerDescriptor::new("financial", "B"), StubHandler::arc("financial"));

        assert!(matches!(result, Err(RouteError::Config(_))));
    }

    #[test]
    fn test_sentinel_tag_rejected() {
        let result = HandlerRegistry::builder()
            .register(HandlerDescriptor::new(UNKNOWN_TAG, "Nope"), StubHandler::arc(UNKNOWN_TAG));

        assert!(matches!(result, Err(RouteError::Config(_))));
    }
}
