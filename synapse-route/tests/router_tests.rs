//! End-to-end routing: classification through aggregation.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use synapse_classify::{KeywordScorer, MockScorer};
use synapse_core::{
    Handler, HandlerDescriptor, HandlerRegistry, HandlerResponse, Query, Result, RouteError,
};
use synapse_route::{Router, RouterConfig, analytics_workflows};

struct CannedHandler {
    tag: String,
    confidence: f64,
    calls: AtomicU32,
}

impl CannedHandler {
    fn new(tag: &str, confidence: f64) -> Arc<Self> {
        Arc::new(Self { tag: tag.to_string(), confidence, calls: AtomicU32::new(0) })
    }
}

#[async_trait]
impl Handler for CannedHandler {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn description(&self) -> &str {
        "canned test handler"
    }

    async fn invoke(&self, query: &Query) -> Result<HandlerResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::new(json!({ "domain": self.tag, "answer_to": query.id }))
            .with_confidence(self.confidence))
    }
}

fn business_registry() -> (Arc<HandlerRegistry>, Arc<CannedHandler>, Arc<CannedHandler>) {
    let financial = CannedHandler::new("financial", 0.9);
    let inventory = CannedHandler::new("inventory", 0.85);
    let registry = HandlerRegistry::builder()
        .register(
            HandlerDescriptor::new("financial", "Financial Intelligence Agent").with_priority(1),
            financial.clone(),
        )
        .unwrap()
        .register(
            HandlerDescriptor::new("inventory", "Inventory Agent").with_priority(2),
            inventory.clone(),
        )
        .unwrap()
        .build();
    (registry, financial, inventory)
}

#[tokio::test]
async fn keyword_routing_end_to_end() {
    let (registry, financial, inventory) = business_registry();
    let router = Router::new(
        Arc::new(KeywordScorer::business_defaults()),
        registry,
        RouterConfig::default().with_accept_threshold(0.05),
    );

    let response = router.route(&Query::new("show me this month's revenue")).await.unwrap();

    assert_eq!(response.primary_tag, "financial");
    assert!(!response.degraded);
    assert_eq!(financial.calls.load(Ordering::SeqCst), 1);
    assert_eq!(inventory.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unclassifiable_query_is_terminal() {
    let (registry, financial, inventory) = business_registry();
    let router = Router::new(
        Arc::new(KeywordScorer::business_defaults()),
        registry,
        RouterConfig::default(),
    );

    let err = router.route(&Query::new("what is the meaning of life?")).await.unwrap_err();

    assert!(matches!(err, RouteError::NoCandidatesRemaining { attempted: 0, .. }));
    assert_eq!(financial.calls.load(Ordering::SeqCst), 0);
    assert_eq!(inventory.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn scorer_outage_surfaces_immediately() {
    let (registry, financial, _) = business_registry();
    let router = Router::new(
        Arc::new(MockScorer::failing("mock", "model offline")),
        registry,
        RouterConfig::default(),
    );

    let err = router.route(&Query::new("revenue")).await.unwrap_err();

    assert!(matches!(err, RouteError::ClassificationUnavailable(_)));
    assert_eq!(financial.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn broad_query_attaches_supplements() {
    let (registry, _, _) = business_registry();
    // Both domains score, neither clears the threshold: the dispatcher
    // escalates through both and merges on exhaustion.
    let scorer =
        MockScorer::new("mock").with_score("financial", 0.7).with_score("inventory", 0.6);
    let router = Router::new(
        Arc::new(scorer),
        registry,
        RouterConfig::default().with_accept_threshold(0.95),
    );

    let response = router.route(&Query::new("revenue and stock position")).await.unwrap();

    assert!(response.degraded);
    assert_eq!(response.primary_tag, "financial");
    assert_eq!(response.supplements.len(), 1);
    assert_eq!(response.supplements[0].tag, "inventory");
    assert_eq!(response.provenance.len(), 2);
}

#[tokio::test]
async fn workflow_trigger_runs_sequence() {
    let descriptive = CannedHandler::new("descriptive", 0.9);
    let diagnostic = CannedHandler::new("diagnostic", 0.85);
    let predictive = CannedHandler::new("predictive", 0.8);
    let prescriptive = CannedHandler::new("prescriptive", 0.9);
    let registry = HandlerRegistry::builder()
        .register(HandlerDescriptor::new("descriptive", "Descriptive").with_priority(1), descriptive.clone())
        .unwrap()
        .register(HandlerDescriptor::new("diagnostic", "Diagnostic").with_priority(2), diagnostic.clone())
        .unwrap()
        .register(HandlerDescriptor::new("predictive", "Predictive").with_priority(3), predictive.clone())
        .unwrap()
        .register(HandlerDescriptor::new("prescriptive", "Prescriptive").with_priority(4), prescriptive.clone())
        .unwrap()
        .build();

    let router = Router::new(
        Arc::new(MockScorer::new("mock")),
        registry,
        RouterConfig::default(),
    )
    .with_workflows(analytics_workflows());

    let response = router
        .route(&Query::new("run a comprehensive analysis of electronics inventory"))
        .await
        .unwrap();

    assert!(!response.degraded);
    assert_eq!(response.provenance.len(), 4);
    assert_eq!(response.primary.as_array().unwrap().len(), 4);
    for handler in [&descriptive, &diagnostic, &predictive, &prescriptive] {
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn workflow_with_missing_stage_is_degraded() {
    let descriptive = CannedHandler::new("descriptive", 0.9);
    let diagnostic = CannedHandler::new("diagnostic", 0.85);
    // prescriptive intentionally unregistered
    let registry = HandlerRegistry::builder()
        .register(HandlerDescriptor::new("descriptive", "Descriptive"), descriptive)
        .unwrap()
        .register(HandlerDescriptor::new("diagnostic", "Diagnostic"), diagnostic)
        .unwrap()
        .build();

    let router = Router::new(
        Arc::new(MockScorer::new("mock")),
        registry,
        RouterConfig::default().with_max_retries(1),
    )
    .with_workflows(analytics_workflows());

    let response =
        router.route(&Query::new("help with the stockout issue")).await.unwrap();

    assert!(response.degraded);
    // problem_solving sequence: descriptive, diagnostic, prescriptive.
    assert_eq!(response.provenance.len(), 3);
    assert_eq!(response.primary.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_queries_share_one_registry() {
    let (registry, financial, _) = business_registry();
    let router = Arc::new(Router::new(
        Arc::new(KeywordScorer::business_defaults()),
        registry,
        RouterConfig::default().with_accept_threshold(0.05),
    ));

    let mut joins = Vec::new();
    for i in 0..8 {
        let router = router.clone();
        joins.push(tokio::spawn(async move {
            router.route(&Query::new(format!("revenue report {i}"))).await
        }));
    }
    for join in joins {
        let response = join.await.unwrap().unwrap();
        assert_eq!(response.primary_tag, "financial");
    }
    assert_eq!(financial.calls.load(Ordering::SeqCst), 8);
}
