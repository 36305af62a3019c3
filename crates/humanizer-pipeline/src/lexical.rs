//! Lexical transform library: word and phrase level substitutions

use rand::Rng;

use humanizer_core::{RequestSettings, Style};

use crate::casing::decapitalize_first;
use crate::rules::{
    self, CONTRACTION_PROBABILITY, CONVERSATIONAL_OPENERS, CONVERSATIONAL_PREFIX,
    SYNONYM_PROBABILITY,
};

/// Firing probabilities for the probabilistic rule categories
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalConfig {
    pub contraction_probability: f64,
    pub synonym_probability: f64,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            contraction_probability: CONTRACTION_PROBABILITY,
            synonym_probability: SYNONYM_PROBABILITY,
        }
    }
}

impl LexicalConfig {
    /// Every probabilistic rule fires whenever it matches
    pub fn always() -> Self {
        Self {
            contraction_probability: 1.0,
            synonym_probability: 1.0,
        }
    }
}

/// Replaces formal phrasing with informal equivalents
#[derive(Debug, Clone, Default)]
pub struct LexicalTransformer {
    config: LexicalConfig,
}

impl LexicalTransformer {
    pub fn new(config: LexicalConfig) -> Self {
        Self { config }
    }

    /// Run every rule category over `text` in a fixed order:
    /// transitions, tone, conversational style, contractions, synonyms.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        text: &str,
        settings: &RequestSettings,
        rng: &mut R,
    ) -> String {
        let mut result = text.to_string();

        for rule in rules::TRANSITIONS.iter() {
            result = rule.apply(&result, rng);
        }

        for rule in rules::rules_for_tone(settings.tone) {
            result = rule.apply(&result, rng);
        }

        if settings.style == Style::Conversational {
            result = conversational_opening(&result);
        }

        for rule in rules::CONTRACTIONS.iter() {
            result = rule.apply_with_probability(&result, self.config.contraction_probability, rng);
        }

        for rule in rules::SYNONYMS.iter() {
            result = rule.apply_with_probability(&result, self.config.synonym_probability, rng);
        }

        result
    }
}

/// Prefix "Well, " unless the text already opens conversationally
fn conversational_opening(text: &str) -> String {
    let trimmed = text.trim_start();
    let first_word = trimmed
        .split(|c: char| c.is_whitespace() || c == ',' || c == '\'')
        .next()
        .unwrap_or("");

    if trimmed.is_empty() || CONVERSATIONAL_OPENERS.contains(&first_word) {
        return text.to_string();
    }

    let leading = &text[..text.len() - trimmed.len()];
    format!("{leading}{CONVERSATIONAL_PREFIX} {}", decapitalize_first(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use humanizer_core::{LengthMode, Tone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings(tone: Tone, style: Style) -> RequestSettings {
        RequestSettings::new(tone, style, LengthMode::Maintain)
    }

    #[test]
    fn test_contraction_preserves_surrounding_spaces() {
        let lexical = LexicalTransformer::new(LexicalConfig::always());
        let mut rng = StdRng::seed_from_u64(3);
        let out = lexical.apply(" I am ", &settings(Tone::Neutral, Style::Professional), &mut rng);
        assert_eq!(out, " I'm ");
    }

    #[test]
    fn test_contractions_keep_sentence_capitalization() {
        let lexical = LexicalTransformer::new(LexicalConfig::always());
        let mut rng = StdRng::seed_from_u64(3);
        let out = lexical.apply(
            "You are late. We do not wait.",
            &settings(Tone::Neutral, Style::Professional),
            &mut rng,
        );
        assert_eq!(out, "You're late. We don't wait.");
    }

    #[test]
    fn test_transitions_apply_unconditionally() {
        let lexical = LexicalTransformer::new(LexicalConfig {
            contraction_probability: 0.0,
            synonym_probability: 0.0,
        });
        let mut rng = StdRng::seed_from_u64(11);
        let out = lexical.apply(
            "In conclusion, the plan works. Furthermore, it scales.",
            &settings(Tone::Neutral, Style::Professional),
            &mut rng,
        );
        assert_eq!(out, "Overall, the plan works. Also, it scales.");
    }

    #[test]
    fn test_friendly_tone_rules() {
        let lexical = LexicalTransformer::new(LexicalConfig {
            contraction_probability: 0.0,
            synonym_probability: 0.0,
        });
        let mut rng = StdRng::seed_from_u64(5);
        let out = lexical.apply(
            "Additionally, the team shipped early.",
            &settings(Tone::Friendly, Style::Professional),
            &mut rng,
        );
        assert_eq!(out, "Plus, the team shipped early.");

        let neutral = lexical.apply(
            "Additionally, the team shipped early.",
            &settings(Tone::Neutral, Style::Professional),
            &mut rng,
        );
        assert_eq!(neutral, "Additionally, the team shipped early.");
    }

    #[test]
    fn test_conversational_prefix() {
        assert_eq!(conversational_opening("The sky is blue."), "Well, the sky is blue.");
        assert_eq!(conversational_opening("It rains."), "It rains.");
        assert_eq!(conversational_opening("I'm here."), "I'm here.");
        assert_eq!(conversational_opening("  The sky is blue."), "  Well, the sky is blue.");
    }

    fn rules_only() -> LexicalTransformer {
        LexicalTransformer::new(LexicalConfig {
            contraction_probability: 0.0,
            synonym_probability: 0.0,
        })
    }

    #[test]
    fn test_casual_tone_rules() {
        let mut rng = StdRng::seed_from_u64(5);
        let out = rules_only().apply(
            "This is very important. The food was excellent and the service terrible.",
            &settings(Tone::Casual, Style::Professional),
            &mut rng,
        );
        assert_eq!(out, "This is really big. The food was awesome and the service awful.");
    }

    #[test]
    fn test_professional_tone_rules() {
        let mut rng = StdRng::seed_from_u64(5);
        let out = rules_only().apply(
            "Awesome demo, awful docs.",
            &settings(Tone::Professional, Style::Professional),
            &mut rng,
        );
        assert_eq!(out, "Excellent demo, poor docs.");
    }

    #[test]
    fn test_friendly_tone_keeps_merge_connector() {
        let mut rng = StdRng::seed_from_u64(5);
        let out = rules_only().apply(
            "It rained; however, we played. However, it got cold.",
            &settings(Tone::Friendly, Style::Professional),
            &mut rng,
        );
        assert_eq!(out, "It rained; however, we played. But, it got cold.");
    }

    #[test]
    fn test_synonym_replaces_single_occurrence() {
        let lexical = LexicalTransformer::new(LexicalConfig {
            contraction_probability: 0.0,
            synonym_probability: 1.0,
        });
        let mut rng = StdRng::seed_from_u64(9);
        let out = lexical.apply(
            "A good plan and a good team.",
            &settings(Tone::Neutral, Style::Professional),
            &mut rng,
        );
        assert_eq!(out.matches("good").count(), 1);
        assert_eq!(humanizer_core::word_count(&out), 7);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let lexical = LexicalTransformer::default();
        let text = "It is a very good idea. We are sure that it is important.";
        let settings = settings(Tone::Neutral, Style::Professional);

        let first = lexical.apply(text, &settings, &mut StdRng::seed_from_u64(42));
        let second = lexical.apply(text, &settings, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
