//! Generation service trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Result;

/// Configuration for one generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub max_new_tokens: u32,
    pub min_length: u32,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub repetition_penalty: Option<f32>,
    pub do_sample: bool,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: "google/flan-t5-base".to_string(),
            max_new_tokens: 256,
            min_length: 0,
            temperature: Some(0.7),
            top_p: Some(0.9),
            repetition_penalty: Some(1.1),
            do_sample: true,
            timeout: Duration::from_secs(30),
        }
    }
}

impl GenerationConfig {
    /// Size the output window to the input: at least as many tokens as words, plus headroom
    pub fn sized_for(mut self, input_words: usize) -> Self {
        let words = u32::try_from(input_words).unwrap_or(u32::MAX);
        self.max_new_tokens = words.saturating_add(20);
        self.min_length = words;
        self
    }
}

/// Text returned by a generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub model_id: String,
}

/// Pretrained text generation capability (hosted seq2seq model, etc.)
///
/// Callers own the lifecycle: construct once at startup and share behind an `Arc`.
/// Any error from `generate_with_config` routes the request to the rule-based pipeline.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate text with default configuration
    async fn generate(&self, prompt: &str) -> Result<GenerationResult>;

    /// Generate text with custom configuration
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sized_for_input() {
        let config = GenerationConfig::default().sized_for(12);
        assert_eq!(config.max_new_tokens, 32);
        assert_eq!(config.min_length, 12);
    }
}
