use crate::config::RouterConfig;
use crate::dispatcher::Dispatcher;
use crate::workflow::WorkflowTable;
use std::sync::Arc;
use synapse_classify::{ClassifierConfig, IntentClassifier};
use synapse_core::{AggregatedResponse, HandlerRegistry, Query, Result, ScoringModel};
use synapse_telemetry::info;

/// Single entry point: workflow check, classification, dispatch.
///
/// Holds no per-query state; one router may serve concurrent queries.
/// Everything it needs arrives explicitly at construction — registry,
/// scorer, config — never from ambient environment state.
pub struct Router {
    classifier: IntentClassifier,
    dispatcher: Dispatcher,
    workflows: WorkflowTable,
}

impl Router {
    pub fn new(
        scorer: Arc<dyn ScoringModel>,
        registry: Arc<HandlerRegistry>,
        config: RouterConfig,
    ) -> Self {
        let classifier = IntentClassifier::new(scorer, registry.clone()).with_config(
            ClassifierConfig::default().with_min_confidence(config.min_confidence),
        );
        let dispatcher = Dispatcher::new(registry, config);
        Self { classifier, dispatcher, workflows: WorkflowTable::empty() }
    }

    #[must_use]
    pub fn with_workflows(mut self, workflows: WorkflowTable) -> Self {
        self.workflows = workflows;
        self
    }

    /// Resolve one query into one response.
    ///
    /// A workflow trigger bypasses classification and runs its whole
    /// sequence. Otherwise the query is classified and dispatched through
    /// the fallback chain. The caller always gets either an
    /// [`AggregatedResponse`] (possibly degraded) or a single terminal
    /// error; no query goes unanswered silently.
    pub async fn route(&self, query: &Query) -> Result<AggregatedResponse> {
        if let Some(pattern) = self.workflows.match_query(&query.text) {
            info!(query_id = %query.id, workflow = %pattern.name, "Workflow trigger matched");
            return self.dispatcher.dispatch_sequence(query, &pattern.sequence).await;
        }

        let ranking = self.classifier.classify(query).await?;
        self.dispatcher.dispatch(query, &ranking).await
    }
}
