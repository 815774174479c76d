use crate::outcome::Attempt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A non-primary successful payload attached to a response.
///
/// Produced when escalation gathered more than one Success (a broad query
/// matching two domains) and the merge policy keeps them alongside the
/// primary payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub tag: String,
    pub payload: Value,
    pub confidence: f64,
}

/// The single outward response for a query.
///
/// `provenance` preserves the exact attempt order for auditability;
/// `confidence` is the maximum over successful attempts; `degraded` marks a
/// response accepted by exhaustion rather than by clearing the accept
/// threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResponse {
    pub query_id: String,
    pub primary_tag: String,
    pub primary: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supplements: Vec<Supplement>,
    pub confidence: f64,
    pub degraded: bool,
    pub provenance: Vec<Attempt>,
}
