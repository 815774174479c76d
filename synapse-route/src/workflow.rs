use serde::Deserialize;

/// A trigger-phrase workflow: when a query contains one of the triggers,
/// the whole handler sequence runs instead of per-tag classification.
#[derive(Clone, Debug, Deserialize)]
pub struct WorkflowPattern {
    pub name: String,
    /// Lowercase phrases matched as substrings of the lowercased query.
    pub triggers: Vec<String>,
    /// Handler tags invoked in order; every stage runs.
    pub sequence: Vec<String>,
}

impl WorkflowPattern {
    pub fn new(name: impl Into<String>, triggers: &[&str], sequence: &[&str]) -> Self {
        Self {
            name: name.into(),
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
            sequence: sequence.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.triggers.iter().any(|trigger| text.contains(trigger))
    }
}

/// Ordered workflow patterns; first match wins.
#[derive(Clone, Debug, Default)]
pub struct WorkflowTable {
    patterns: Vec<WorkflowPattern>,
}

impl WorkflowTable {
    pub fn new(patterns: Vec<WorkflowPattern>) -> Self {
        Self { patterns }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn match_query(&self, text: &str) -> Option<&WorkflowPattern> {
        self.patterns.iter().find(|pattern| pattern.matches(text))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// The four-tier analytics workflows: sequences over the descriptive,
/// diagnostic, predictive, and prescriptive handler tags.
pub fn analytics_workflows() -> WorkflowTable {
    WorkflowTable::new(vec![
        WorkflowPattern::new(
            "comprehensive_analysis",
            &["comprehensive", "complete", "full analysis", "everything", "all aspects"],
            &["descriptive", "diagnostic", "predictive", "prescriptive"],
        ),
        WorkflowPattern::new(
            "problem_solving",
            &["problem", "issue", "fix", "solve", "help with"],
            &["descriptive", "diagnostic", "prescriptive"],
        ),
        WorkflowPattern::new(
            "planning_workflow",
            &["plan", "planning", "strategy", "prepare", "future"],
            &["descriptive", "predictive", "prescriptive"],
        ),
        WorkflowPattern::new(
            "performance_review",
            &["performance", "review", "evaluation", "assessment"],
            &["descriptive", "diagnostic"],
        ),
    ])
}
