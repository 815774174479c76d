use crate::aggregator::{Aggregator, MergePolicy};
use crate::config::RouterConfig;
use crate::fallback::{FallbackChain, FallbackDecision};
use std::sync::Arc;
use synapse_core::{
    AggregatedResponse, Attempt, AttemptOutcome, ClassificationResult, HandlerRegistry, Query,
    RegistryEntry, Result, RouteError,
};
use synapse_telemetry::{debug, info, warn};

/// Invokes handlers for a query's ranked candidates under the fallback
/// policy and resolves a single response.
///
/// Dispatchers hold no per-query state; the registry is the only shared
/// piece and it is immutable, so independent dispatchers can process
/// queries concurrently over the same registry.
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
    config: RouterConfig,
    fallback: FallbackChain,
}

impl Dispatcher {
    pub fn new(registry: Arc<HandlerRegistry>, config: RouterConfig) -> Self {
        let fallback = FallbackChain::new(config.clone());
        Self { registry, config, fallback }
    }

    /// Try ranked candidates in order until the fallback chain accepts a
    /// Success or the candidates are exhausted.
    ///
    /// The sentinel `unknown` tag is never dispatched. A tag with no
    /// registry entry is recorded as a failed attempt and skipped. On
    /// exhaustion the best below-threshold Success is returned marked
    /// degraded; with no Success at all the query resolves to a terminal
    /// [`RouteError::NoCandidatesRemaining`].
    pub async fn dispatch(
        &self,
        query: &Query,
        ranking: &ClassificationResult,
    ) -> Result<AggregatedResponse> {
        let candidates: Vec<&str> = ranking
            .ranked()
            .iter()
            .filter(|candidate| !candidate.is_unknown())
            .map(|candidate| candidate.tag.as_str())
            .collect();

        if candidates.is_empty() {
            return Err(RouteError::NoCandidatesRemaining {
                attempted: 0,
                last: "no routable candidates".to_string(),
            });
        }

        debug!(query_id = %query.id, candidates = candidates.len(), "Dispatching query");

        let mut attempts: Vec<Attempt> = Vec::new();
        let mut accepted = false;
        for (position, tag) in candidates.iter().enumerate() {
            let remaining = candidates.len() - position - 1;
            if self.run_candidate(query, tag, remaining, &mut attempts).await {
                accepted = true;
                break;
            }
        }

        if accepted {
            self.aggregator().aggregate(query, attempts, false)
        } else if attempts.iter().any(|a| a.outcome.is_success()) {
            // Accept-by-exhaustion: no Success cleared the threshold, the
            // best one goes out flagged degraded.
            info!(query_id = %query.id, "Candidates exhausted; returning degraded best");
            self.aggregator().aggregate(query, attempts, true)
        } else {
            Err(terminal_error(&attempts))
        }
    }

    /// Run a fixed handler sequence (a workflow), invoking every stage
    /// regardless of earlier acceptances and concatenating all Successes.
    ///
    /// Each stage runs under the same retry/timeout policy as single
    /// dispatch; a stage that exhausts its retries is recorded and skipped.
    /// The response is degraded when any stage produced no Success.
    pub async fn dispatch_sequence(
        &self,
        query: &Query,
        sequence: &[String],
    ) -> Result<AggregatedResponse> {
        if sequence.is_empty() {
            return Err(RouteError::NoCandidatesRemaining {
                attempted: 0,
                last: "empty workflow sequence".to_string(),
            });
        }

        debug!(query_id = %query.id, stages = sequence.len(), "Dispatching workflow sequence");

        let mut attempts: Vec<Attempt> = Vec::new();
        for (position, tag) in sequence.iter().enumerate() {
            let remaining = sequence.len() - position - 1;
            self.run_candidate(query, tag, remaining, &mut attempts).await;
        }

        if !attempts.iter().any(|a| a.outcome.is_success()) {
            return Err(terminal_error(&attempts));
        }

        let degraded = sequence
            .iter()
            .any(|tag| !attempts.iter().any(|a| &a.tag == tag && a.outcome.is_success()));
        Aggregator::new(MergePolicy::ConcatenateAll).aggregate(query, attempts, degraded)
    }

    /// Attempt one candidate tag, retrying per the fallback policy.
    /// Returns true when an attempt was accepted.
    async fn run_candidate(
        &self,
        query: &Query,
        tag: &str,
        remaining: usize,
        attempts: &mut Vec<Attempt>,
    ) -> bool {
        let Some(entry) = self.registry.get(tag) else {
            warn!(query_id = %query.id, tag, "No registered handler for candidate tag");
            let reason = RouteError::UnregisteredHandler(tag.to_string()).to_string();
            attempts.push(Attempt::new(tag, AttemptOutcome::Failure { reason }));
            return false;
        };

        loop {
            let outcome = self.invoke_once(entry, query).await;
            let current = Attempt::new(tag, outcome);
            match self.fallback.decide(attempts, &current, remaining) {
                FallbackDecision::Accept => {
                    info!(
                        query_id = %query.id,
                        tag,
                        confidence = current.outcome.confidence().unwrap_or(0.0),
                        "Handler response accepted"
                    );
                    attempts.push(current);
                    return true;
                }
                FallbackDecision::Retry => {
                    attempts.push(current);
                    let prior = self.fallback.failed_attempts(attempts, tag) as u32;
                    let delay = self.fallback.backoff_delay(prior);
                    warn!(
                        query_id = %query.id,
                        tag,
                        failed_attempts = prior,
                        delay_ms = delay.as_millis() as u64,
                        "Handler attempt failed; retrying after backoff"
                    );
                    tokio::time::sleep(delay).await;
                }
                FallbackDecision::Escalate | FallbackDecision::Abort => {
                    attempts.push(current);
                    return false;
                }
            }
        }
    }

    /// One handler invocation under the descriptor's timeout.
    ///
    /// The call runs on a spawned task so an expired timeout only stops the
    /// wait; the task is aborted, but work already inside an external
    /// service cannot be interrupted (best-effort cancellation).
    async fn invoke_once(&self, entry: &RegistryEntry, query: &Query) -> AttemptOutcome {
        let handler = entry.handler.clone();
        let query = query.clone();
        let mut task = tokio::spawn(async move { handler.invoke(&query).await });

        match tokio::time::timeout(entry.descriptor.timeout(), &mut task).await {
            Ok(Ok(Ok(response))) => AttemptOutcome::Success {
                payload: response.payload,
                confidence: response.confidence,
            },
            Ok(Ok(Err(e))) => AttemptOutcome::Failure { reason: e.to_string() },
            Ok(Err(join_error)) => {
                AttemptOutcome::Failure { reason: format!("handler panicked: {join_error}") }
            }
            Err(_elapsed) => {
                task.abort();
                warn!(
                    tag = %entry.descriptor.tag,
                    timeout_ms = entry.descriptor.timeout_ms,
                    "Handler invocation timed out"
                );
                AttemptOutcome::Timeout
            }
        }
    }

    fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.config.merge_policy)
    }
}

fn terminal_error(attempts: &[Attempt]) -> RouteError {
    RouteError::NoCandidatesRemaining {
        attempted: attempts.len(),
        last: attempts
            .last()
            .map(|a| format!("{}: {}", a.tag, a.outcome))
            .unwrap_or_else(|| "no routable candidates".to_string()),
    }
}
