use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use synapse_core::{AggregatedResponse, Attempt, Query, Result, RouteError, Supplement};

/// How multiple successful payloads merge into one response.
///
/// A policy hook, not hardwired logic: dispatch uses whatever the router
/// config selects, workflows force [`MergePolicy::ConcatenateAll`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Highest-confidence Success becomes the primary payload; other
    /// Successes attach as supplements in attempt order.
    #[default]
    PrimaryWithSupplements,
    /// All Success payloads join into one array payload, each element
    /// carrying its originating tag.
    ConcatenateAll,
}

/// Composes the single outward response from a query's attempt record.
pub struct Aggregator {
    policy: MergePolicy,
}

impl Aggregator {
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    /// Merge the collected attempts into an [`AggregatedResponse`].
    ///
    /// Requires at least one Success among `attempts`; the dispatcher
    /// resolves all-failure records to a terminal error before aggregation.
    /// Provenance carries every attempt in exact invocation order; overall
    /// confidence is the maximum over successes.
    pub fn aggregate(
        &self,
        query: &Query,
        attempts: Vec<Attempt>,
        degraded: bool,
    ) -> Result<AggregatedResponse> {
        let successes: Vec<(usize, &Attempt, f64)> = attempts
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.outcome.confidence().map(|c| (i, a, c)))
            .collect();

        // Confidence ties resolve to the earlier attempt (the higher-ranked
        // candidate).
        let Some(&(primary_idx, primary_attempt, confidence)) = successes.iter().max_by(|a, b| {
            a.2.partial_cmp(&b.2)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.0.cmp(&a.0))
        }) else {
            return Err(RouteError::NoCandidatesRemaining {
                attempted: attempts.len(),
                last: attempts
                    .last()
                    .map(|a| format!("{}: {}", a.tag, a.outcome))
                    .unwrap_or_else(|| "no attempts recorded".to_string()),
            });
        };

        let (primary_tag, primary, supplements) = match self.policy {
            MergePolicy::PrimaryWithSupplements => {
                let primary = payload_of(primary_attempt);
                let supplements = successes
                    .iter()
                    .filter(|(i, _, _)| *i != primary_idx)
                    .map(|(_, attempt, confidence)| Supplement {
                        tag: attempt.tag.clone(),
                        payload: payload_of(attempt),
                        confidence: *confidence,
                    })
                    .collect();
                (primary_attempt.tag.clone(), primary, supplements)
            }
            MergePolicy::ConcatenateAll => {
                let merged: Vec<Value> = successes
                    .iter()
                    .map(|(_, attempt, _)| json!({ "tag": attempt.tag, "payload": payload_of(attempt) }))
                    .collect();
                (primary_attempt.tag.clone(), Value::Array(merged), Vec::new())
            }
        };

        Ok(AggregatedResponse {
            query_id: query.id.clone(),
            primary_tag,
            primary,
            supplements,
            confidence,
            degraded,
            provenance: attempts,
        })
    }
}

fn payload_of(attempt: &Attempt) -> Value {
    match &attempt.outcome {
        synapse_core::AttemptOutcome::Success { payload, .. } => payload.clone(),
        _ => Value::Null,
    }
}
