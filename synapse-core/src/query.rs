use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An incoming natural-language request.
///
/// Created once per request and never mutated; the router only ever reads
/// it. The optional context reference points at surrounding conversation
/// state held by the caller (a session id, a thread id) — the router treats
/// it as opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_ref: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: format!("qry-{}", uuid::Uuid::new_v4()),
            text: text.into(),
            timestamp: Utc::now(),
            context_ref: None,
        }
    }

    pub fn with_context_ref(mut self, context_ref: impl Into<String>) -> Self {
        self.context_ref = Some(context_ref.into());
        self
    }
}
