use crate::config::RouterConfig;
use std::time::Duration;
use synapse_core::{Attempt, AttemptOutcome};

/// What the dispatcher should do after a handler attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackDecision {
    /// Use this Success as the final answer; invoke nothing further.
    Accept,
    /// Re-invoke the same handler after backoff.
    Retry,
    /// Move on to the next ranked candidate.
    Escalate,
    /// Nothing left to try; resolve from what was collected.
    Abort,
}

/// The core escalation policy.
///
/// Stateless between queries: `decide` is a pure function of the attempt
/// history, the current outcome, and the count of candidates still queued,
/// so identical inputs always yield identical decisions.
pub struct FallbackChain {
    config: RouterConfig,
}

impl FallbackChain {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Decide the next step after `current`.
    ///
    /// `history` holds every attempt recorded before `current`, in order;
    /// `remaining_candidates` counts ranked tags not yet tried.
    ///
    /// - Success at or above the accept threshold → [`FallbackDecision::Accept`].
    /// - Success below the threshold → escalate; the dispatcher keeps it as
    ///   the best-so-far degraded candidate.
    /// - Failure or Timeout → retry the same handler while its failed
    ///   attempts (current included) stay below `max_retries`, then
    ///   escalate.
    /// - Escalation with nothing remaining → [`FallbackDecision::Abort`].
    pub fn decide(
        &self,
        history: &[Attempt],
        current: &Attempt,
        remaining_candidates: usize,
    ) -> FallbackDecision {
        match &current.outcome {
            AttemptOutcome::Success { confidence, .. } => {
                if *confidence >= self.config.accept_threshold {
                    FallbackDecision::Accept
                } else {
                    self.escalate_or_abort(remaining_candidates)
                }
            }
            AttemptOutcome::Failure { .. } | AttemptOutcome::Timeout => {
                let failed = self.failed_attempts(history, &current.tag) + 1;
                if failed < self.config.max_retries.max(1) as usize {
                    FallbackDecision::Retry
                } else {
                    self.escalate_or_abort(remaining_candidates)
                }
            }
        }
    }

    /// Delay before the next retry of a handler that has already failed
    /// `prior_failures` times (at least 1). Exponential with a cap.
    pub fn backoff_delay(&self, prior_failures: u32) -> Duration {
        let multiplier = f64::from(self.config.backoff_multiplier.max(1.0));
        let exponent = prior_failures.saturating_sub(1).min(30);
        let scaled = self.config.initial_backoff().as_secs_f64() * multiplier.powi(exponent as i32);
        Duration::from_secs_f64(scaled).min(self.config.max_backoff())
    }

    /// Failed attempts recorded for `tag` so far.
    pub fn failed_attempts(&self, history: &[Attempt], tag: &str) -> usize {
        history.iter().filter(|a| a.tag == tag && !a.outcome.is_success()).count()
    }

    fn escalate_or_abort(&self, remaining_candidates: usize) -> FallbackDecision {
        if remaining_candidates == 0 {
            FallbackDecision::Abort
        } else {
            FallbackDecision::Escalate
        }
    }
}
