//! One full rule-based rewrite: segment, restructure, substitute, balance

use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use humanizer_core::{CandidateText, RequestSettings, SentenceSegmenter, SourceText};

use crate::balancer::LengthBalancer;
use crate::lexical::LexicalTransformer;
use crate::segmenter::PunctuationSegmenter;
use crate::structural::StructuralTransformer;

/// Failures inside a single pipeline run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    #[error("segmentation produced no sentences")]
    NoSentences,

    #[error("pipeline produced an empty candidate on attempt {0}")]
    EmptyCandidate(u32),
}

impl From<ProcessingError> for humanizer_core::Error {
    fn from(err: ProcessingError) -> Self {
        humanizer_core::Error::Processing(err.to_string())
    }
}

#[derive(Clone)]
pub struct HumanizationPipeline {
    segmenter: Arc<dyn SentenceSegmenter>,
    structural: StructuralTransformer,
    lexical: LexicalTransformer,
    balancer: LengthBalancer,
}

impl Default for HumanizationPipeline {
    fn default() -> Self {
        Self::new(
            Arc::new(PunctuationSegmenter::new()),
            StructuralTransformer::default(),
            LexicalTransformer::default(),
            LengthBalancer::default(),
        )
    }
}

impl HumanizationPipeline {
    pub fn new(
        segmenter: Arc<dyn SentenceSegmenter>,
        structural: StructuralTransformer,
        lexical: LexicalTransformer,
        balancer: LengthBalancer,
    ) -> Self {
        Self {
            segmenter,
            structural,
            lexical,
            balancer,
        }
    }

    /// Swap the sentence segmenter, keeping every other stage
    pub fn with_segmenter(mut self, segmenter: Arc<dyn SentenceSegmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn run<R: Rng + ?Sized>(
        &self,
        source: &SourceText,
        settings: &RequestSettings,
        attempt: u32,
        rng: &mut R,
    ) -> Result<CandidateText, ProcessingError> {
        let sentences = source.sentences(self.segmenter.as_ref());
        if sentences.is_empty() {
            return Err(ProcessingError::NoSentences);
        }

        let structural = self
            .structural
            .transform(&sentences, settings.preserve_length(), rng);
        let lexical = self.lexical.apply(&structural.text, settings, rng);
        let balanced = self.balancer.balance(&lexical, source.word_count(), rng);

        debug!(
            attempt,
            sentences = sentences.len(),
            merged_at = ?structural.merged_at,
            adjustment = ?balanced.adjustment,
            "pipeline run complete"
        );

        if balanced.text.trim().is_empty() {
            return Err(ProcessingError::EmptyCandidate(attempt));
        }

        Ok(CandidateText::new(balanced.text, attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use humanizer_core::{LengthMode, Style, Tone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct NothingSegmenter;

    impl SentenceSegmenter for NothingSegmenter {
        fn segment(&self, _text: &str) -> Vec<String> {
            Vec::new()
        }
    }

    fn maintain() -> RequestSettings {
        RequestSettings::new(Tone::Neutral, Style::Professional, LengthMode::Maintain)
    }

    #[test]
    fn test_run_produces_text() {
        let pipeline = HumanizationPipeline::default();
        let source = SourceText::new("We are ready. It is a good day to ship.").unwrap();

        for seed in 0..25 {
            let candidate = pipeline
                .run(&source, &maintain(), 1, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert!(!candidate.as_str().trim().is_empty());
            assert_eq!(candidate.attempt(), 1);
        }
    }

    #[test]
    fn test_empty_segmentation_is_an_error() {
        let pipeline =
            HumanizationPipeline::default().with_segmenter(Arc::new(NothingSegmenter));
        let source = SourceText::new("Some text.").unwrap();
        let err = pipeline
            .run(&source, &maintain(), 1, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(err, ProcessingError::NoSentences);

        let core: humanizer_core::Error = err.into();
        assert!(matches!(core, humanizer_core::Error::Processing(_)));
    }

    #[test]
    fn test_same_seed_same_candidate() {
        let pipeline = HumanizationPipeline::default();
        let source = SourceText::new(
            "The research team has carefully analyzed the data. They are not sure yet. It is important.",
        )
        .unwrap();
        let settings = RequestSettings::new(Tone::Casual, Style::Conversational, LengthMode::Shorter);

        let a = pipeline.run(&source, &settings, 1, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = pipeline.run(&source, &settings, 1, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }
}
