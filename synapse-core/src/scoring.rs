use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// External scoring capability behind the classifier.
///
/// The implementation may be an LLM, a rules engine, or a keyword matcher;
/// the core treats it as an opaque oracle and applies only ranking and
/// thresholding on top of the returned map. Tags absent from the returned
/// map are treated as confidence 0.
#[async_trait]
pub trait ScoringModel: Send + Sync {
    fn name(&self) -> &str;

    async fn score(&self, text: &str, candidate_tags: &[String]) -> Result<HashMap<String, f64>>;
}
