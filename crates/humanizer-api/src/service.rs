//! Request orchestration: model first, rule-based gate as the fallback

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use humanizer_core::{
    Error, GenerationConfig, GenerationService, HumanizeMethod, HumanizeRequest, HumanizeResponse,
    LengthMode, QualityThresholds, RequestSettings, Result, SourceText, Style, Tone,
};
use humanizer_pipeline::{AcceptanceGate, GateOutcome, HumanizationPipeline, QualityScorer};

use crate::config::ServerConfig;

/// Model output shorter than this (trimmed, in characters) is discarded
pub const MIN_MODEL_OUTPUT_CHARS: usize = 10;

const PROMPT_PREFIX: &str = "Make this text sound more human and conversational";

const NOTE_MODEL_UNAVAILABLE: &str = "Using fallback humanization (model not available)";
const NOTE_MODEL_REJECTED: &str =
    "Model output failed quality validation; using rule-based humanization";

/// Build the instruction prompt, adding hints only for non-default settings
pub fn build_prompt(text: &str, settings: &RequestSettings) -> String {
    let mut hints = Vec::new();
    if settings.tone != Tone::Neutral {
        hints.push(format!("{} tone", settings.tone.as_str()));
    }
    if settings.style != Style::Professional {
        hints.push(format!("{} style", settings.style.as_str()));
    }
    match settings.length {
        LengthMode::Maintain => {}
        LengthMode::Shorter => hints.push("a little shorter".to_string()),
        LengthMode::Longer => hints.push("a little longer".to_string()),
    }

    if hints.is_empty() {
        format!("{PROMPT_PREFIX}: {text}")
    } else {
        format!("{PROMPT_PREFIX} ({}): {text}", hints.join(", "))
    }
}

/// Why the model path was not used
enum ModelOutcome {
    Accepted(HumanizeResponse),
    Unavailable,
    Failed(Error),
    Rejected,
}

#[derive(Clone)]
pub struct HumanizeService {
    generator: Option<Arc<dyn GenerationService>>,
    gate: AcceptanceGate,
    thresholds: QualityThresholds,
    seed: Option<u64>,
    generation_timeout: Duration,
}

impl HumanizeService {
    pub fn new(config: &ServerConfig, generator: Option<Arc<dyn GenerationService>>) -> Self {
        Self {
            generator,
            gate: AcceptanceGate::new(
                HumanizationPipeline::default(),
                QualityScorer::new(config.thresholds),
            ),
            thresholds: config.thresholds,
            seed: config.seed,
            generation_timeout: config.generation_timeout,
        }
    }

    pub fn model_id(&self) -> Option<&str> {
        self.generator.as_deref().map(|g| g.model_id())
    }

    /// Rewrite one request. Only blank text is an error; every other failure
    /// degrades to the rule-based gate with a note explaining why.
    pub async fn humanize(&self, request: &HumanizeRequest) -> Result<HumanizeResponse> {
        let source = SourceText::new(request.text.clone())?;
        let settings = request.settings();

        let note = match self.try_model(request, &source, &settings).await {
            ModelOutcome::Accepted(response) => return Ok(response),
            ModelOutcome::Unavailable => NOTE_MODEL_UNAVAILABLE.to_string(),
            ModelOutcome::Failed(e) => format!("Using fallback due to error: {e}"),
            ModelOutcome::Rejected => NOTE_MODEL_REJECTED.to_string(),
        };

        let outcome = self.run_gate(source, settings).await?;
        info!(
            attempts = outcome.attempts,
            passes = outcome.report.passes_validation,
            words = outcome.candidate.word_count(),
            "rule-based humanization complete"
        );

        let note = match outcome.note {
            Some(gate_note) => format!("{note}; {gate_note}"),
            None => note,
        };

        Ok(
            HumanizeResponse::new(request, outcome.candidate.into_string(), HumanizeMethod::RuleBased)
                .with_report(&outcome.report)
                .with_note(Some(note)),
        )
    }

    async fn try_model(
        &self,
        request: &HumanizeRequest,
        source: &SourceText,
        settings: &RequestSettings,
    ) -> ModelOutcome {
        let Some(generator) = self.generator.as_deref() else {
            debug!("no generation model configured");
            return ModelOutcome::Unavailable;
        };

        let prompt = build_prompt(source.as_str(), settings);
        let config = GenerationConfig {
            model_id: generator.model_id().to_string(),
            timeout: self.generation_timeout,
            ..GenerationConfig::default()
        }
        .sized_for(source.word_count());

        let generated = match timeout(
            self.generation_timeout,
            generator.generate_with_config(&prompt, &config),
        )
        .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(error = %e, "generation failed, using rule-based humanization");
                return ModelOutcome::Failed(e);
            }
            Err(_) => {
                warn!("generation timed out, using rule-based humanization");
                return ModelOutcome::Failed(Error::Timeout(format!(
                    "generation did not finish within {}ms",
                    self.generation_timeout.as_millis()
                )));
            }
        };

        let text = generated.text.trim();
        if text.chars().count() < MIN_MODEL_OUTPUT_CHARS {
            warn!(chars = text.chars().count(), "generated text too short");
            return ModelOutcome::Failed(Error::Generation(format!(
                "generated text shorter than {MIN_MODEL_OUTPUT_CHARS} characters"
            )));
        }

        let scorer = QualityScorer::new(self.thresholds).with_strict_length(settings.preserve_length());
        let (original, candidate) = (source.as_str().to_string(), text.to_string());
        let report = match task::spawn_blocking(move || scorer.score(&original, &candidate)).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "quality scoring task failed");
                return ModelOutcome::Failed(Error::Processing(format!("quality scoring failed: {e}")));
            }
        };
        if !report.passes_validation {
            warn!(
                similarity = report.content_similarity,
                quality = report.overall_quality,
                length_match = report.length_match,
                "model output failed quality validation"
            );
            return ModelOutcome::Rejected;
        }

        info!(model = %generated.model_id, "model humanization accepted");
        ModelOutcome::Accepted(
            HumanizeResponse::new(request, text.to_string(), HumanizeMethod::Model).with_report(&report),
        )
    }

    /// Scoring is quadratic in text size, so the gate runs off the async workers
    async fn run_gate(&self, source: SourceText, settings: RequestSettings) -> Result<GateOutcome> {
        let gate = self.gate.clone();
        let seed = self.seed;
        task::spawn_blocking(move || {
            let mut rng = request_rng(seed);
            gate.run(&source, &settings, &mut rng)
        })
        .await
        .map_err(|e| Error::Processing(format!("rule-based humanization task failed: {e}")))
    }
}

fn request_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
