use std::cmp::Ordering;
use std::sync::Arc;
use synapse_core::{
    ClassificationResult, HandlerRegistry, Query, RankedTag, Result, RouteError, ScoringModel,
};

/// Thresholding policy owned by the classifier.
#[derive(Clone, Debug)]
pub struct ClassifierConfig {
    /// Tags scoring below this are dropped, unless dropping them all would
    /// leave the result empty (the unknown sentinel stands in then).
    pub min_confidence: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { min_confidence: 0.1 }
    }
}

impl ClassifierConfig {
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }
}

/// Turns raw query text into ranked candidate domains.
///
/// Scoring is delegated to the injected [`ScoringModel`]; the classifier
/// owns only ranking and thresholding. Confidence ties are broken by
/// registry priority (lower tried first), then by tag for determinism.
pub struct IntentClassifier {
    scorer: Arc<dyn ScoringModel>,
    registry: Arc<HandlerRegistry>,
    config: ClassifierConfig,
}

impl IntentClassifier {
    pub fn new(scorer: Arc<dyn ScoringModel>, registry: Arc<HandlerRegistry>) -> Self {
        Self { scorer, registry, config: ClassifierConfig::default() }
    }

    #[must_use]
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Classify a query into a non-empty ranked candidate list.
    ///
    /// A scorer failure is fatal for the query and surfaces as
    /// [`RouteError::ClassificationUnavailable`]; there is nothing to fall
    /// back to without a classification.
    pub async fn classify(&self, query: &Query) -> Result<ClassificationResult> {
        if query.text.trim().is_empty() {
            return Ok(ClassificationResult::unknown());
        }

        let candidates = self.registry.tags();
        let scores = self
            .scorer
            .score(&query.text, &candidates)
            .await
            .map_err(|e| RouteError::ClassificationUnavailable(e.to_string()))?;

        let mut ranked: Vec<RankedTag> = scores
            .into_iter()
            .filter(|(tag, _)| self.registry.contains(tag))
            .map(|(tag, confidence)| RankedTag::new(tag, confidence.clamp(0.0, 1.0)))
            .filter(|candidate| candidate.confidence >= self.config.min_confidence)
            .collect();

        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    self.registry.priority_of(&a.tag).cmp(&self.registry.priority_of(&b.tag))
                })
                .then_with(|| a.tag.cmp(&b.tag))
        });

        tracing::debug!(
            query_id = %query.id,
            scorer = self.scorer.name(),
            candidates = ranked.len(),
            "Query classified"
        );

        Ok(ClassificationResult::new(ranked))
    }
}
