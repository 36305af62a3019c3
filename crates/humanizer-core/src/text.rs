//! Source and candidate texts flowing through the pipeline

use serde::{Deserialize, Serialize};

use crate::segment::SentenceSegmenter;
use crate::{Error, Result};

/// Number of whitespace-delimited words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// The caller's text; created once per request and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    content: String,
    word_count: usize,
}

impl SourceText {
    /// Wrap raw input, rejecting empty or whitespace-only text
    pub fn new(content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(Error::InvalidInput("Text is required".to_string()));
        }

        let word_count = word_count(&content);
        Ok(Self { content, word_count })
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn character_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Sentence segmentation derived through an external segmenter
    pub fn sentences(&self, segmenter: &dyn SentenceSegmenter) -> Vec<String> {
        segmenter.segment(&self.content)
    }
}

/// Output of one full pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateText {
    content: String,
    word_count: usize,
    attempt: u32,
}

impl CandidateText {
    pub fn new(content: impl Into<String>, attempt: u32) -> Self {
        let content = content.into();
        let word_count = word_count(&content);
        Self {
            content,
            word_count,
            attempt,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn character_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Which pipeline invocation produced this candidate (1-based, 0 for the
    /// basic contraction fallback)
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_source_rejected() {
        assert!(matches!(SourceText::new(""), Err(Error::InvalidInput(_))));
        assert!(matches!(SourceText::new("  \n\t "), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_source_derived_counts() {
        let source = SourceText::new("This is a short test sentence.").unwrap();
        assert_eq!(source.word_count(), 6);
        assert_eq!(source.character_count(), 30);
    }

    #[test]
    fn test_candidate_counts_words() {
        let candidate = CandidateText::new("I'm  here\nnow", 2);
        assert_eq!(candidate.word_count(), 3);
        assert_eq!(candidate.attempt(), 2);
    }
}
