//! Quality report and acceptance thresholds

use serde::{Deserialize, Serialize};

/// Scoring result for one (original, candidate) pair. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub content_similarity: f64,
    pub length_ratio: f64,
    pub length_match: bool,
    pub has_contractions: bool,
    pub vocabulary_variety: bool,
    pub has_human_patterns: bool,
    pub overall_quality: f64,
    pub passes_validation: bool,
    pub original_word_count: usize,
    pub candidate_word_count: usize,
}

/// Floors a candidate must clear to be accepted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    pub min_similarity: f64,
    pub quality_threshold: f64,
    /// Require an exact word-count match
    pub strict_length: bool,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_similarity: 0.6,
            quality_threshold: 0.7,
            strict_length: true,
        }
    }
}

impl QualityThresholds {
    pub fn with_strict_length(mut self, strict: bool) -> Self {
        self.strict_length = strict;
        self
    }

    /// Apply the acceptance rule to raw scores
    pub fn passes(&self, content_similarity: f64, overall_quality: f64, length_match: bool) -> bool {
        content_similarity >= self.min_similarity
            && overall_quality >= self.quality_threshold
            && (!self.strict_length || length_match)
    }
}
