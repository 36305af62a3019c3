//! Acceptance gate: accept, retry once on the original, or force-accept

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use humanizer_core::{CandidateText, QualityReport, RequestSettings, SourceText};

use crate::fallback::basic_contractions;
use crate::pipeline::HumanizationPipeline;
use crate::scorer::QualityScorer;

/// Attempt number carried by the basic contraction fallback
pub const FALLBACK_ATTEMPT: u32 = 0;

const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct GateOutcome {
    pub candidate: CandidateText,
    pub report: QualityReport,
    /// Pipeline runs performed (1 or 2)
    pub attempts: u32,
    /// Set when a processing error was absorbed
    pub note: Option<String>,
}

#[derive(Clone, Default)]
pub struct AcceptanceGate {
    pipeline: HumanizationPipeline,
    scorer: QualityScorer,
}

impl AcceptanceGate {
    pub fn new(pipeline: HumanizationPipeline, scorer: QualityScorer) -> Self {
        Self { pipeline, scorer }
    }

    /// Never fails: quality problems end in a forced accept, processing
    /// errors end in the basic contraction fallback.
    pub fn run<R: Rng + ?Sized>(
        &self,
        source: &SourceText,
        settings: &RequestSettings,
        rng: &mut R,
    ) -> GateOutcome {
        let scorer = self.scorer.with_strict_length(settings.preserve_length());
        let score = |candidate: &CandidateText| scorer.score(source.as_str(), candidate.as_str());

        // A scored first candidate that failed validation, kept in case the
        // retry errors out.
        let mut rejected = None;
        let mut first_error = None;

        match self.pipeline.run(source, settings, 1, rng) {
            Ok(candidate) => {
                let report = score(&candidate);
                if report.passes_validation {
                    debug!(
                        similarity = report.content_similarity,
                        quality = report.overall_quality,
                        "first candidate accepted"
                    );
                    return GateOutcome {
                        candidate,
                        report,
                        attempts: 1,
                        note: None,
                    };
                }
                debug!(
                    similarity = report.content_similarity,
                    quality = report.overall_quality,
                    length_match = report.length_match,
                    "first candidate rejected, retrying on original text"
                );
                rejected = Some((candidate, report));
            }
            Err(e) => {
                warn!(error = %e, "first pipeline attempt failed");
                first_error = Some(e);
            }
        }

        match self.pipeline.run(source, settings, MAX_ATTEMPTS, rng) {
            Ok(candidate) => {
                let report = score(&candidate);
                debug!(
                    similarity = report.content_similarity,
                    quality = report.overall_quality,
                    passes = report.passes_validation,
                    "second candidate accepted"
                );
                GateOutcome {
                    candidate,
                    report,
                    attempts: MAX_ATTEMPTS,
                    note: first_error.map(|e| format!("Recovered from processing error: {e}")),
                }
            }
            Err(e) => {
                warn!(error = %e, "second pipeline attempt failed");
                let note = Some(format!("Recovered from processing error: {e}"));

                if let Some((candidate, report)) = rejected {
                    return GateOutcome {
                        candidate,
                        report,
                        attempts: MAX_ATTEMPTS,
                        note,
                    };
                }

                let candidate =
                    CandidateText::new(basic_contractions(source.as_str()), FALLBACK_ATTEMPT);
                let report = score(&candidate);
                GateOutcome {
                    candidate,
                    report,
                    attempts: MAX_ATTEMPTS,
                    note: Some(format!(
                        "Using basic contraction fallback after processing error: {e}"
                    )),
                }
            }
        }
    }
}
