use async_trait::async_trait;
use std::collections::HashMap;
use synapse_core::{Result, ScoringModel};

/// Keyword-overlap scoring oracle.
///
/// Confidence for a tag is the fraction of its keyword list found in the
/// lowercased query text, capped at 1.0. Tags with no match are omitted
/// from the result (treated as confidence 0 by the classifier). This keeps
/// the router runnable without any model service behind it.
pub struct KeywordScorer {
    name: String,
    domains: HashMap<String, Vec<String>>,
}

impl KeywordScorer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), domains: HashMap::new() }
    }

    #[must_use]
    pub fn with_domain(mut self, tag: impl Into<String>, keywords: &[&str]) -> Self {
        self.domains
            .insert(tag.into(), keywords.iter().map(|k| k.to_lowercase()).collect());
        self
    }

    /// Keyword lists for the four business-intelligence domains.
    pub fn business_defaults() -> Self {
        Self::new("keyword-scorer")
            .with_domain(
                "financial",
                &[
                    "sales", "revenue", "profit", "cash", "balance", "ledger", "transaction",
                    "margin", "income", "expense",
                ],
            )
            .with_domain(
                "database",
                &["client", "customer", "database", "record", "account", "lookup", "verify"],
            )
            .with_domain(
                "strategic",
                &[
                    "strategy", "strategic", "leadership", "decision", "executive", "planning",
                    "vision", "goals", "market", "growth", "expansion",
                ],
            )
            .with_domain(
                "inventory",
                &[
                    "inventory", "stock", "supply", "logistics", "warehouse", "reorder", "demand",
                    "forecast", "stockout", "overstock",
                ],
            )
    }
}

#[async_trait]
impl ScoringModel for KeywordScorer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn score(&self, text: &str, candidate_tags: &[String]) -> Result<HashMap<String, f64>> {
        let text = text.to_lowercase();
        let mut scores = HashMap::new();

        for tag in candidate_tags {
            let Some(keywords) = self.domains.get(tag) else {
                continue;
            };
            if keywords.is_empty() {
                continue;
            }
            let matched = keywords.iter().filter(|k| text.contains(k.as_str())).count();
            if matched > 0 {
                scores.insert(tag.clone(), (matched as f64 / keywords.len() as f64).min(1.0));
            }
        }

        Ok(scores)
    }
}
