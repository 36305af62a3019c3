//! Hosted seq2seq inference client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use humanizer_core::{Error, GenerationConfig, GenerationResult, GenerationService, Result};

use crate::config::InferenceConfig;

/// Client for a Hugging Face style text-generation endpoint
pub struct HuggingFaceClient {
    config: InferenceConfig,
    client: Client,
    defaults: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationParams {
    max_new_tokens: u32,
    min_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repetition_penalty: Option<f32>,
    do_sample: bool,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
    use_cache: bool,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParams,
    options: RequestOptions,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
    Failure { error: String },
}

impl HuggingFaceClient {
    /// Create a new client from configuration
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        let defaults = GenerationConfig {
            model_id: config.model_repo.clone(),
            timeout: config.timeout,
            ..GenerationConfig::default()
        };

        Ok(Self {
            config,
            client,
            defaults,
        })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = InferenceConfig::from_env()?;
        Self::new(config)
    }

    /// Default generation settings for this client's model
    pub fn defaults(&self) -> &GenerationConfig {
        &self.defaults
    }

    fn request_body<'a>(prompt: &'a str, config: &GenerationConfig) -> GenerationRequest<'a> {
        GenerationRequest {
            inputs: prompt,
            parameters: GenerationParams {
                max_new_tokens: config.max_new_tokens,
                min_length: config.min_length,
                temperature: config.temperature,
                top_p: config.top_p,
                repetition_penalty: config.repetition_penalty,
                do_sample: config.do_sample,
            },
            options: RequestOptions {
                wait_for_model: false,
                use_cache: false,
            },
        }
    }

    /// Perform the actual generation request
    async fn perform_generation(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let url = self.config.endpoint(&config.model_id);
        let body = Self::request_body(prompt, config);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .bearer_auth(&self.config.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(e.to_string())
                } else {
                    Error::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(format!(
                    "inference endpoint rejected credentials ({status})"
                )),
                StatusCode::SERVICE_UNAVAILABLE => Error::GenerationUnavailable(format!(
                    "model {} is not ready: {}",
                    config.model_id, response_text
                )),
                _ => Error::Generation(format!(
                    "inference request failed with status {status}: {response_text}"
                )),
            });
        }

        let parsed: GenerationResponse = serde_json::from_str(&response_text)?;
        let text = match parsed {
            GenerationResponse::Batch(results) => results
                .into_iter()
                .next()
                .map(|r| r.generated_text)
                .unwrap_or_default(),
            GenerationResponse::Single(result) => result.generated_text,
            GenerationResponse::Failure { error } => return Err(Error::Generation(error)),
        };

        let cleaned = clean_output(&text, prompt);
        if cleaned.is_empty() {
            return Err(Error::Generation(
                "Empty response from inference endpoint".to_string(),
            ));
        }

        Ok(cleaned)
    }
}

/// Trim whitespace and drop an echoed prompt, which causal models prepend
fn clean_output(text: &str, prompt: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(prompt.trim())
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

#[async_trait]
impl GenerationService for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        self.generate_with_config(prompt, &self.defaults).await
    }

    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        debug!(model = %config.model_id, max_new_tokens = config.max_new_tokens, "requesting generation");

        let text = timeout(config.timeout, self.perform_generation(prompt, config))
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "generation did not finish within {}ms",
                    config.timeout.as_millis()
                ))
            })??;

        Ok(GenerationResult {
            text,
            model_id: config.model_id.clone(),
        })
    }

    fn model_id(&self) -> &str {
        &self.config.model_repo
    }
}
