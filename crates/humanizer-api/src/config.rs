//! Server configuration

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use humanizer_core::{Error, QualityThresholds, Result};

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_BODY_LIMIT_KB: usize = 256;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Bearer secret for `POST /humanize`; `None` disables auth
    pub api_secret: Option<String>,
    /// Fixed seed for every request's random stream
    pub seed: Option<u64>,
    pub thresholds: QualityThresholds,
    pub generation_timeout: Duration,
    pub body_limit_kb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            api_secret: None,
            seed: None,
            thresholds: QualityThresholds::default(),
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
            body_limit_kb: DEFAULT_BODY_LIMIT_KB,
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let bind = get("HUMANIZER_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| Error::Configuration(format!("HUMANIZER_BIND: {e}")))?;

        let seed = get("HUMANIZER_SEED")
            .map(|raw| parse_number::<u64>("HUMANIZER_SEED", &raw))
            .transpose()?;

        let mut thresholds = defaults.thresholds;
        if let Some(raw) = get("HUMANIZER_MIN_SIMILARITY") {
            thresholds.min_similarity = parse_unit("HUMANIZER_MIN_SIMILARITY", &raw)?;
        }
        if let Some(raw) = get("HUMANIZER_QUALITY_THRESHOLD") {
            thresholds.quality_threshold = parse_unit("HUMANIZER_QUALITY_THRESHOLD", &raw)?;
        }

        let generation_timeout = get("GENERATION_TIMEOUT_SECS")
            .map(|raw| parse_number::<u64>("GENERATION_TIMEOUT_SECS", &raw))
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(defaults.generation_timeout);

        Ok(Self {
            bind,
            api_secret: get("API_SECRET"),
            seed,
            thresholds,
            generation_timeout,
            body_limit_kb: defaults.body_limit_kb,
        })
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    pub fn with_api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::Configuration(format!("{key} is not a valid number: {raw}")))
}

fn parse_unit(key: &str, raw: &str) -> Result<f64> {
    let value = parse_number::<f64>(key, raw)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::Configuration(format!("{key} must be within [0, 1], got {value}")));
    }
    Ok(value)
}
