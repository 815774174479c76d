use serde::{Deserialize, Serialize};

/// Sentinel tag used when classification finds no candidate above the
/// confidence floor. It is reserved: the registry refuses to register it
/// and the dispatcher never invokes it.
pub const UNKNOWN_TAG: &str = "unknown";

/// One candidate domain for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTag {
    pub tag: String,
    pub confidence: f64,
}

impl RankedTag {
    pub fn new(tag: impl Into<String>, confidence: f64) -> Self {
        Self { tag: tag.into(), confidence }
    }

    pub fn is_unknown(&self) -> bool {
        self.tag == UNKNOWN_TAG
    }
}

/// Ranked classification of a query, confidence descending.
///
/// Never empty: when nothing clears the classifier's confidence floor, a
/// single [`UNKNOWN_TAG`] entry at confidence 0 stands in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    ranked: Vec<RankedTag>,
}

impl ClassificationResult {
    /// Build a result from already-ranked tags, substituting the unknown
    /// sentinel when `ranked` is empty.
    pub fn new(ranked: Vec<RankedTag>) -> Self {
        if ranked.is_empty() {
            Self { ranked: vec![RankedTag::new(UNKNOWN_TAG, 0.0)] }
        } else {
            Self { ranked }
        }
    }

    pub fn unknown() -> Self {
        Self::new(Vec::new())
    }

    pub fn ranked(&self) -> &[RankedTag] {
        &self.ranked
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// True when the only candidate is the unknown sentinel.
    pub fn is_unknown_only(&self) -> bool {
        self.ranked.len() == 1 && self.ranked[0].is_unknown()
    }

    pub fn top(&self) -> &RankedTag {
        // Invariant: ranked is never empty.
        &self.ranked[0]
    }
}
