//! Request and response shapes of the humanize operation

use serde::{Deserialize, Serialize};

use crate::quality::QualityReport;
use crate::settings::RequestSettings;

fn default_tone() -> String {
    "neutral".to_string()
}

fn default_style() -> String {
    "professional".to_string()
}

fn default_length() -> String {
    "maintain".to_string()
}

/// Incoming humanize request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanizeRequest {
    pub text: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_length")]
    pub length: String,
}

impl HumanizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: default_tone(),
            style: default_style(),
            length: default_length(),
        }
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.length = length.into();
        self
    }

    pub fn settings(&self) -> RequestSettings {
        RequestSettings::parse(&self.tone, &self.style, &self.length)
    }

    pub fn settings_echo(&self) -> SettingsEcho {
        SettingsEcho {
            tone: self.tone.clone(),
            style: self.style.clone(),
            length: self.length.clone(),
        }
    }
}

/// Settings as the caller sent them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsEcho {
    pub tone: String,
    pub style: String,
    pub length: String,
}

/// Which path produced the returned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumanizeMethod {
    #[serde(rename = "model")]
    Model,
    #[serde(rename = "rule-based")]
    RuleBased,
}

/// Wire form of a quality report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub content_similarity: f64,
    pub overall_quality: f64,
    pub length_match: bool,
    pub original_word_count: usize,
    pub humanized_word_count: usize,
    pub has_contractions: bool,
    pub has_human_patterns: bool,
    pub passes_validation: bool,
}

impl From<&QualityReport> for QualityMetrics {
    fn from(report: &QualityReport) -> Self {
        Self {
            content_similarity: round3(report.content_similarity),
            overall_quality: round3(report.overall_quality),
            length_match: report.length_match,
            original_word_count: report.original_word_count,
            humanized_word_count: report.candidate_word_count,
            has_contractions: report.has_contractions,
            has_human_patterns: report.has_human_patterns,
            passes_validation: report.passes_validation,
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Outgoing humanize response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeResponse {
    pub success: bool,
    pub original_text: String,
    pub humanized_text: String,
    pub word_count: usize,
    pub character_count: usize,
    pub settings: SettingsEcho,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_metrics: Option<QualityMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub method: HumanizeMethod,
}

impl HumanizeResponse {
    pub fn new(request: &HumanizeRequest, humanized_text: String, method: HumanizeMethod) -> Self {
        Self {
            success: true,
            original_text: request.text.clone(),
            word_count: crate::text::word_count(&humanized_text),
            character_count: humanized_text.chars().count(),
            humanized_text,
            settings: request.settings_echo(),
            quality_metrics: None,
            note: None,
            method,
        }
    }

    pub fn with_report(mut self, report: &QualityReport) -> Self {
        self.quality_metrics = Some(QualityMetrics::from(report));
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: HumanizeRequest = serde_json::from_str(r#"{"text": "Hello there."}"#).unwrap();
        assert_eq!(request.tone, "neutral");
        assert_eq!(request.style, "professional");
        assert_eq!(request.length, "maintain");
        assert!(request.settings().preserve_length());
    }

    #[test]
    fn test_response_omits_absent_fields() {
        let request = HumanizeRequest::new("It is fine.");
        let response = HumanizeResponse::new(&request, "It's fine.".to_string(), HumanizeMethod::RuleBased);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["humanizedText"], "It's fine.");
        assert_eq!(value["wordCount"], 2);
        assert_eq!(value["characterCount"], 10);
        assert_eq!(value["method"], "rule-based");
        assert!(value.get("qualityMetrics").is_none());
        assert!(value.get("note").is_none());
    }
}
