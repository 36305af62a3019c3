//! Static transform rule tables
//!
//! Every table is compiled once on first use and shared read-only across
//! requests.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex};
use std::collections::HashSet;

use humanizer_core::Tone;

use crate::casing::match_case;

// ---------------------------------------------------------------------------
// Rule type
// ---------------------------------------------------------------------------

/// How many matches a fired rule rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    Every,
    FirstOnly,
}

/// A (pattern, replacement set, application probability) triple
#[derive(Debug, Clone)]
pub struct TransformRule {
    pattern: Regex,
    replacements: Vec<&'static str>,
    probability: f64,
    scope: MatchScope,
}

impl TransformRule {
    /// Case-insensitive whole-word rule for `phrase`
    pub fn word(
        phrase: &str,
        replacements: &[&'static str],
        probability: f64,
        scope: MatchScope,
    ) -> Self {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase)))
            .unwrap_or_else(|e| panic!("invalid word rule {phrase:?}: {e}"));
        Self::from_regex(pattern, replacements, probability, scope)
    }

    /// Case-sensitive exact phrase, anchored on a leading word boundary
    pub fn exact(phrase: &str, replacement: &'static str) -> Self {
        let pattern = Regex::new(&format!(r"\b{}", regex::escape(phrase)))
            .unwrap_or_else(|e| panic!("invalid phrase rule {phrase:?}: {e}"));
        Self::from_regex(pattern, &[replacement], 1.0, MatchScope::Every)
    }

    fn from_regex(
        pattern: Regex,
        replacements: &[&'static str],
        probability: f64,
        scope: MatchScope,
    ) -> Self {
        Self {
            pattern,
            replacements: replacements.to_vec(),
            probability: probability.clamp(0.0, 1.0),
            scope,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Apply with the rule's own probability
    pub fn apply<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        self.apply_with_probability(text, self.probability, rng)
    }

    /// Apply with an overriding probability.
    ///
    /// The random stream is only consumed when the pattern matches, so rules
    /// that cannot fire leave later decisions unchanged.
    pub fn apply_with_probability<R: Rng + ?Sized>(
        &self,
        text: &str,
        probability: f64,
        rng: &mut R,
    ) -> String {
        if self.replacements.is_empty() || !self.pattern.is_match(text) {
            return text.to_string();
        }

        let probability = probability.clamp(0.0, 1.0);
        if probability < 1.0 && !rng.gen_bool(probability) {
            return text.to_string();
        }

        let replacement = self
            .replacements
            .choose(rng)
            .copied()
            .unwrap_or_default();
        let substitute = |caps: &Captures| match_case(&caps[0], replacement);

        match self.scope {
            MatchScope::Every => self.pattern.replace_all(text, substitute).into_owned(),
            MatchScope::FirstOnly => self.pattern.replacen(text, 1, substitute).into_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Probabilities
// ---------------------------------------------------------------------------

pub const CONTRACTION_PROBABILITY: f64 = 0.7;
pub const SYNONYM_PROBABILITY: f64 = 0.4;

// ---------------------------------------------------------------------------
// Lexical tables
// ---------------------------------------------------------------------------

pub(crate) const CONTRACTION_PAIRS: &[(&str, &str)] = &[
    ("I am", "I'm"),
    ("you are", "you're"),
    ("we are", "we're"),
    ("they are", "they're"),
    ("it is", "it's"),
    ("that is", "that's"),
    ("there is", "there's"),
    ("here is", "here's"),
    ("I will", "I'll"),
    ("you will", "you'll"),
    ("we will", "we'll"),
    ("they will", "they'll"),
    ("it will", "it'll"),
    ("I would", "I'd"),
    ("you would", "you'd"),
    ("we would", "we'd"),
    ("they would", "they'd"),
    ("I have", "I've"),
    ("you have", "you've"),
    ("we have", "we've"),
    ("they have", "they've"),
    ("do not", "don't"),
    ("does not", "doesn't"),
    ("did not", "didn't"),
    ("is not", "isn't"),
    ("are not", "aren't"),
    ("was not", "wasn't"),
    ("cannot", "can't"),
    ("will not", "won't"),
    ("would not", "wouldn't"),
    ("should not", "shouldn't"),
    ("could not", "couldn't"),
    ("let us", "let's"),
];

const SYNONYM_TABLE: &[(&str, &[&str])] = &[
    ("very", &["really", "quite", "truly", "pretty"]),
    ("good", &["great", "solid", "nice", "decent"]),
    ("important", &["key", "vital", "essential", "major"]),
    ("significant", &["major", "notable", "big"]),
    ("numerous", &["many", "countless"]),
    ("utilize", &["use"]),
    ("utilizes", &["uses"]),
    ("utilized", &["used"]),
    ("demonstrate", &["show"]),
    ("demonstrates", &["shows"]),
    ("approximately", &["about", "roughly"]),
    ("additional", &["extra", "more"]),
    ("obtain", &["get"]),
    ("purchase", &["buy"]),
    ("assist", &["help"]),
    ("commence", &["start", "begin"]),
    ("sufficient", &["enough"]),
    ("require", &["need"]),
    ("requires", &["needs"]),
    ("comprehensive", &["thorough", "complete"]),
];

const TRANSITION_PAIRS: &[(&str, &str)] = &[
    ("In conclusion,", "Overall,"),
    ("Furthermore,", "Also,"),
    ("Moreover,", "Besides,"),
    ("Consequently,", "So,"),
    ("Nevertheless,", "Still,"),
    ("Subsequently,", "Later,"),
    ("In addition,", "Also,"),
    ("It is important to note that", "Keep in mind that"),
];

/// Case-sensitive, so the lowercase "; however," merge connector is left alone
const FRIENDLY_OPENER_PAIRS: &[(&str, &str)] = &[
    ("Additionally", "Plus"),
    ("However", "But"),
    ("Therefore", "So"),
];

const FRIENDLY_PAIRS: &[(&str, &str)] = &[("assist", "help")];

const CASUAL_PAIRS: &[(&str, &str)] = &[
    ("very", "really"),
    ("important", "big"),
    ("excellent", "awesome"),
    ("terrible", "awful"),
];

const PROFESSIONAL_PAIRS: &[(&str, &str)] = &[("awesome", "excellent"), ("awful", "poor")];

/// Openers that make the conversational "Well, " prefix redundant
pub(crate) const CONVERSATIONAL_OPENERS: &[&str] =
    &["I", "You", "We", "They", "It", "This", "That", "Well"];

pub(crate) const CONVERSATIONAL_PREFIX: &str = "Well,";

pub(crate) static CONTRACTIONS: Lazy<Vec<TransformRule>> = Lazy::new(|| {
    CONTRACTION_PAIRS
        .iter()
        .map(|(formal, informal)| {
            TransformRule::word(formal, &[*informal], CONTRACTION_PROBABILITY, MatchScope::Every)
        })
        .collect()
});

pub(crate) static SYNONYMS: Lazy<Vec<TransformRule>> = Lazy::new(|| {
    SYNONYM_TABLE
        .iter()
        .map(|(word, choices)| {
            TransformRule::word(word, choices, SYNONYM_PROBABILITY, MatchScope::FirstOnly)
        })
        .collect()
});

pub(crate) static TRANSITIONS: Lazy<Vec<TransformRule>> = Lazy::new(|| {
    TRANSITION_PAIRS
        .iter()
        .map(|(formal, informal)| TransformRule::exact(formal, *informal))
        .collect()
});

fn tone_rules(pairs: &[(&str, &'static str)]) -> Vec<TransformRule> {
    pairs
        .iter()
        .map(|(formal, informal)| TransformRule::word(formal, &[*informal], 1.0, MatchScope::Every))
        .collect()
}

static FRIENDLY: Lazy<Vec<TransformRule>> = Lazy::new(|| {
    FRIENDLY_OPENER_PAIRS
        .iter()
        .map(|(formal, informal)| TransformRule::exact(formal, *informal))
        .chain(tone_rules(FRIENDLY_PAIRS))
        .collect()
});
static CASUAL: Lazy<Vec<TransformRule>> = Lazy::new(|| tone_rules(CASUAL_PAIRS));
static PROFESSIONAL: Lazy<Vec<TransformRule>> = Lazy::new(|| tone_rules(PROFESSIONAL_PAIRS));

/// Unconditional replacements selected by tone
pub(crate) fn rules_for_tone(tone: Tone) -> &'static [TransformRule] {
    match tone {
        Tone::Friendly => FRIENDLY.as_slice(),
        Tone::Casual => CASUAL.as_slice(),
        Tone::Professional => PROFESSIONAL.as_slice(),
        Tone::Neutral => &[],
    }
}

// ---------------------------------------------------------------------------
// Structural tables
// ---------------------------------------------------------------------------

pub(crate) const QUALIFIERS: &[&str] = &[
    "perhaps",
    "likely",
    "it seems",
    "apparently",
    "generally",
    "typically",
];

pub(crate) const DETERMINERS: &[&str] = &["the", "a", "an", "this", "that", "these", "those"];

pub(crate) const CONNECTORS: &[&str] = &[", and", ", but", ", so", "; however,"];

// ---------------------------------------------------------------------------
// Balancer tables
// ---------------------------------------------------------------------------

pub(crate) const REMOVABLE_FILLERS: &[&str] = &["really", "very", "quite", "actually", "basically"];

pub(crate) const INSERTABLE_FILLERS: &[&str] = &["really", "actually", "quite", "just"];

/// Every word the rule pipeline can introduce into a text, lowercased
pub fn rule_vocabulary() -> HashSet<String> {
    let replacement_words = CONTRACTION_PAIRS
        .iter()
        .map(|(_, informal)| *informal)
        .chain(SYNONYM_TABLE.iter().flat_map(|(_, choices)| choices.iter().copied()))
        .chain(TRANSITION_PAIRS.iter().map(|(_, informal)| *informal))
        .chain(
            [FRIENDLY_OPENER_PAIRS, FRIENDLY_PAIRS, CASUAL_PAIRS, PROFESSIONAL_PAIRS]
                .into_iter()
                .flat_map(|pairs| pairs.iter().map(|(_, informal)| *informal)),
        )
        .chain(QUALIFIERS.iter().copied())
        .chain(CONNECTORS.iter().copied())
        .chain(INSERTABLE_FILLERS.iter().copied())
        .chain(std::iter::once(CONVERSATIONAL_PREFIX));

    replacement_words
        .flat_map(|phrase| phrase.split_whitespace())
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_contraction_rule_with_forced_probability() {
        let rule = TransformRule::word("I am", &["I'm"], 1.0, MatchScope::Every);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(rule.apply(" I am ", &mut rng), " I'm ");
    }

    #[test]
    fn test_word_rule_respects_boundaries() {
        let rule = TransformRule::word("it is", &["it's"], 1.0, MatchScope::Every);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(rule.apply("Habit isolates.", &mut rng), "Habit isolates.");
        assert_eq!(rule.apply("It is here, and it is now.", &mut rng), "It's here, and it's now.");
    }

    #[test]
    fn test_first_only_scope() {
        let rule = TransformRule::word("good", &["great"], 1.0, MatchScope::FirstOnly);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(rule.apply("Good food, good mood.", &mut rng), "Great food, good mood.");
    }

    #[test]
    fn test_zero_probability_never_fires() {
        let rule = TransformRule::word("do not", &["don't"], 0.0, MatchScope::Every);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(rule.apply("We do not stop.", &mut rng), "We do not stop.");
        }
    }

    #[test]
    fn test_exact_rule_is_case_sensitive() {
        let rule = TransformRule::exact("Furthermore,", "Also,");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(rule.apply("Furthermore, it works.", &mut rng), "Also, it works.");
        assert_eq!(rule.apply("furthermore, it works.", &mut rng), "furthermore, it works.");
    }

    #[test]
    fn test_tables_compile() {
        assert_eq!(CONTRACTIONS.len(), CONTRACTION_PAIRS.len());
        assert!(SYNONYMS.iter().all(|r| r.probability() == SYNONYM_PROBABILITY));
        assert!(TRANSITIONS.iter().all(|r| r.probability() == 1.0));
        assert!(rules_for_tone(Tone::Neutral).is_empty());
    }

    #[test]
    fn test_rule_vocabulary_contains_replacements() {
        let vocab = rule_vocabulary();
        assert!(vocab.contains("i'm"));
        assert!(vocab.contains("perhaps"));
        assert!(vocab.contains("however"));
        assert!(vocab.contains("well"));
    }
}
