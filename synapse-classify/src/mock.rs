use async_trait::async_trait;
use std::collections::HashMap;
use synapse_core::{Result, RouteError, ScoringModel};

/// Canned-score oracle for tests and examples.
pub struct MockScorer {
    name: String,
    scores: HashMap<String, f64>,
    fail_with: Option<String>,
}

impl MockScorer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), scores: HashMap::new(), fail_with: None }
    }

    /// A scorer whose every call fails, for exercising the fatal
    /// classification-unavailable path.
    pub fn failing(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { name: name.into(), scores: HashMap::new(), fail_with: Some(reason.into()) }
    }

    #[must_use]
    pub fn with_score(mut self, tag: impl Into<String>, confidence: f64) -> Self {
        self.scores.insert(tag.into(), confidence);
        self
    }
}

#[async_trait]
impl ScoringModel for MockScorer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn score(&self, _text: &str, candidate_tags: &[String]) -> Result<HashMap<String, f64>> {
        if let Some(reason) = &self.fail_with {
            return Err(RouteError::ClassificationUnavailable(reason.clone()));
        }
        Ok(self
            .scores
            .iter()
            .filter(|(tag, _)| candidate_tags.contains(tag))
            .map(|(tag, confidence)| (tag.clone(), *confidence))
            .collect())
    }
}
