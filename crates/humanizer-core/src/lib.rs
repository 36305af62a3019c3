//! Core traits and types for the Notecraft humanizer
//!
//! This crate defines the types shared by the rewriting pipeline, the model
//! client and the HTTP surface: settings, source/candidate texts, quality
//! reports, request/response shapes, and the capability traits for text
//! generation and sentence segmentation.

pub mod error;
pub mod generation;
pub mod quality;
pub mod segment;
pub mod settings;
pub mod text;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use generation::{GenerationConfig, GenerationResult, GenerationService};
pub use quality::{QualityReport, QualityThresholds};
pub use segment::SentenceSegmenter;
pub use settings::{LengthMode, RequestSettings, Style, Tone};
pub use text::{word_count, CandidateText, SourceText};
pub use types::*;
