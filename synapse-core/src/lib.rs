//! # synapse-core
//!
//! Core traits and types for the Synapse query router.
//!
//! ## Overview
//!
//! This crate provides the foundational abstractions shared by the
//! classifier and the dispatcher:
//!
//! - [`Query`] - Immutable incoming request
//! - [`Handler`] / [`HandlerResponse`] - The single capability contract
//!   every domain handler satisfies
//! - [`ScoringModel`] - The external scoring oracle behind classification
//! - [`HandlerRegistry`] / [`HandlerDescriptor`] - Static tag → capability
//!   mapping frozen at startup
//! - [`ClassificationResult`] / [`RankedTag`] - Ranked candidate domains
//! - [`Attempt`] / [`AttemptOutcome`] / [`AggregatedResponse`] - Per-query
//!   provenance and the single outward response
//! - [`RouteError`] / [`Result`] - Unified error handling
//!
//! ## Core traits
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait Handler: Send + Sync {
//!     fn tag(&self) -> &str;
//!     fn description(&self) -> &str;
//!     async fn invoke(&self, query: &Query) -> Result<HandlerResponse>;
//! }
//!
//! #[async_trait]
//! pub trait ScoringModel: Send + Sync {
//!     fn name(&self) -> &str;
//!     async fn score(&self, text: &str, candidate_tags: &[String]) -> Result<HashMap<String, f64>>;
//! }
//! ```

pub mod descriptor;
pub mod error;
pub mod handler;
pub mod outcome;
pub mod query;
pub mod ranking;
pub mod registry;
pub mod response;
pub mod scoring;

pub use descriptor::{DEFAULT_TIMEOUT_MS, HandlerDescriptor};
pub use error::{Result, RouteError};
pub use handler::{Handler, HandlerResponse};
pub use outcome::{Attempt, AttemptOutcome};
pub use query::Query;
pub use ranking::{ClassificationResult, RankedTag, UNKNOWN_TAG};
pub use registry::{HandlerRegistry, RegistryBuilder, RegistryEntry};
pub use response::{AggregatedResponse, Supplement};
pub use scoring::ScoringModel;
