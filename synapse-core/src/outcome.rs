use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a single handler invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success { payload: Value, confidence: f64 },
    Failure { reason: String },
    Timeout,
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Confidence of a successful attempt, `None` otherwise.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Success { confidence, .. } => Some(*confidence),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success { confidence, .. } => {
                write!(f, "success (confidence {confidence:.2})")
            }
            Self::Failure { reason } => write!(f, "failure: {reason}"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

/// One entry in a query's provenance: which handler was tried and how it
/// went. Attempts are recorded in exact invocation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub tag: String,
    pub outcome: AttemptOutcome,
}

impl Attempt {
    pub fn new(tag: impl Into<String>, outcome: AttemptOutcome) -> Self {
        Self { tag: tag.into(), outcome }
    }
}
