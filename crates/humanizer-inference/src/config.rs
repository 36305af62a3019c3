//! Inference endpoint configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use humanizer_core::{Error, Result};

pub const DEFAULT_MODEL_REPO: &str = "google/flan-t5-base";
pub const DEFAULT_API_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the hosted generation client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub api_token: String,
    pub model_repo: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl InferenceConfig {
    /// Create configuration from environment variables.
    ///
    /// Fails when `HF_API_TOKEN` is missing; callers treat that as "no model".
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup("HF_API_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                Error::Configuration("HF_API_TOKEN environment variable not found".to_string())
            })?;

        let model_repo = lookup("MODEL_REPO").unwrap_or_else(|| DEFAULT_MODEL_REPO.to_string());

        let api_url = lookup("HF_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match lookup("GENERATION_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Configuration(format!("GENERATION_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_token,
            model_repo,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            model_repo: DEFAULT_MODEL_REPO.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the model endpoint
    pub fn endpoint(&self, model_id: &str) -> String {
        format!("{}/{}", self.api_url, model_id)
    }
}
