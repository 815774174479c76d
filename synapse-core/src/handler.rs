use crate::{Query, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Payload returned by a successful handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub payload: Value,
    /// Handler's self-reported confidence in [0, 1]. Defaults to 1.0 for
    /// handlers that do not estimate one.
    pub confidence: f64,
}

impl HandlerResponse {
    pub fn new(payload: Value) -> Self {
        Self { payload, confidence: 1.0 }
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

/// A domain-specific responder (financial, inventory, strategic, ...).
///
/// Handlers are opaque external collaborators: the router only ever calls
/// `invoke` and inspects the returned payload/confidence, never handler
/// internals. Implementations must be safe to call from concurrent
/// dispatchers.
#[async_trait]
pub trait Handler: Send + Sync {
    fn tag(&self) -> &str;
    fn description(&self) -> &str;

    async fn invoke(&self, query: &Query) -> Result<HandlerResponse>;
}
