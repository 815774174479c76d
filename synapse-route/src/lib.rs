//! # synapse-route
//!
//! Registry-driven dispatch and fallback for the Synapse query router.
//!
//! A query flows through:
//!
//! 1. [`Router::route`] — workflow trigger check, then classification.
//! 2. [`Dispatcher::dispatch`] — ranked candidates invoked in order, each
//!    under its descriptor's timeout.
//! 3. [`FallbackChain::decide`] — accept / retry-with-backoff / escalate /
//!    abort after every attempt.
//! 4. [`Aggregator::aggregate`] — one outward response with full attempt
//!    provenance, degraded-flagged when accepted by exhaustion.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use synapse_classify::KeywordScorer;
//! use synapse_core::{HandlerRegistry, Query};
//! use synapse_route::{Router, RouterConfig};
//!
//! # async fn example(registry: Arc<HandlerRegistry>) -> synapse_core::Result<()> {
//! let scorer = Arc::new(KeywordScorer::business_defaults());
//! let router = Router::new(scorer, registry, RouterConfig::default());
//! let response = router.route(&Query::new("why did revenue drop?")).await?;
//! println!("{} answered: {}", response.primary_tag, response.primary);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod config;
pub mod dispatcher;
pub mod fallback;
pub mod router;
pub mod workflow;

pub use aggregator::{Aggregator, MergePolicy};
pub use config::{RouterConfig, RouterConfigFile};
pub use dispatcher::Dispatcher;
pub use fallback::{FallbackChain, FallbackDecision};
pub use router::Router;
pub use workflow::{WorkflowPattern, WorkflowTable, analytics_workflows};
