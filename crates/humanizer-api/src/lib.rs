//! Humanize service and HTTP surface for the Notecraft humanizer
//!
//! `HumanizeService` tries the configured generation model first and routes
//! to the rule-based acceptance gate whenever the model is absent, fails or
//! produces output that does not clear the quality check. The `http` module
//! exposes it over axum.

mod config;
mod http;
mod service;


pub use config::ServerConfig;
pub use http::{router, run_server, AppError, AppState};
pub use service::{build_prompt, HumanizeService, MIN_MODEL_OUTPUT_CHARS};
