//! # synapse-classify
//!
//! Intent classification for the Synapse query router.
//!
//! The [`IntentClassifier`] turns raw query text into a ranked, non-empty
//! [`ClassificationResult`](synapse_core::ClassificationResult). Actual
//! scoring is delegated to whatever
//! [`ScoringModel`](synapse_core::ScoringModel) is injected — an LLM
//! adapter, the bundled [`KeywordScorer`], or the canned [`MockScorer`] in
//! tests — while the classifier owns ranking, tie-breaking by registry
//! priority, and the minimum-confidence threshold.

pub mod classifier;
pub mod keyword;
pub mod mock;

pub use classifier::{ClassifierConfig, IntentClassifier};
pub use keyword::KeywordScorer;
pub use mock::MockScorer;
