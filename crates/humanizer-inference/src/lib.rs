//! Hosted model integration for the Notecraft humanizer
//!
//! This crate provides a `GenerationService` backed by a Hugging Face style
//! inference endpoint.

mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::HuggingFaceClient;
pub use config::InferenceConfig;

// Re-export core types for convenience
pub use humanizer_core::{Error, GenerationConfig, GenerationResult, GenerationService, Result};
