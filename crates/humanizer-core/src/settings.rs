//! Caller-supplied rewriting preferences

use serde::{Deserialize, Serialize};

/// Voice the rewrite should lean towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Friendly,
    Casual,
    Professional,
}

impl Tone {
    /// Parse leniently; unrecognised values fall back to neutral
    pub fn parse(s: &str) -> Tone {
        match s.trim().to_lowercase().as_str() {
            "friendly" | "warm" => Tone::Friendly,
            "casual" | "informal" => Tone::Casual,
            "professional" | "formal" => Tone::Professional,
            _ => Tone::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Friendly => "friendly",
            Tone::Casual => "casual",
            Tone::Professional => "professional",
        }
    }
}

/// Register of the rewritten text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Professional,
    Casual,
    Conversational,
}

impl Style {
    /// Parse leniently; unrecognised values fall back to professional
    pub fn parse(s: &str) -> Style {
        match s.trim().to_lowercase().as_str() {
            "casual" => Style::Casual,
            "conversational" => Style::Conversational,
            _ => Style::Professional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Professional => "professional",
            Style::Casual => "casual",
            Style::Conversational => "conversational",
        }
    }
}

/// Requested output length relative to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthMode {
    #[default]
    Maintain,
    Shorter,
    Longer,
}

impl LengthMode {
    /// Parse leniently; unrecognised values fall back to maintain
    pub fn parse(s: &str) -> LengthMode {
        match s.trim().to_lowercase().as_str() {
            "shorter" | "short" => LengthMode::Shorter,
            "longer" | "long" => LengthMode::Longer,
            _ => LengthMode::Maintain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthMode::Maintain => "maintain",
            LengthMode::Shorter => "shorter",
            LengthMode::Longer => "longer",
        }
    }

    /// Structural transforms must keep the word count unchanged
    pub fn preserves_length(&self) -> bool {
        matches!(self, LengthMode::Maintain)
    }
}

/// Immutable per-request settings consulted by both transform stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequestSettings {
    pub tone: Tone,
    pub style: Style,
    pub length: LengthMode,
}

impl RequestSettings {
    pub fn new(tone: Tone, style: Style, length: LengthMode) -> Self {
        Self { tone, style, length }
    }

    /// Build settings from the raw request strings
    pub fn parse(tone: &str, style: &str, length: &str) -> Self {
        Self {
            tone: Tone::parse(tone),
            style: Style::parse(style),
            length: LengthMode::parse(length),
        }
    }

    pub fn preserve_length(&self) -> bool {
        self.length.preserves_length()
    }
}
