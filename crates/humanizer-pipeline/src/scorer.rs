//! Quality scorer: content preservation and human-likeness signals

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use humanizer_core::{word_count, QualityReport, QualityThresholds};

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}']+").unwrap_or_else(|e| panic!("token regex: {e}")));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // articles and determiners
        "the", "a", "an", "this", "that", "these", "those", "some", "any", "all", "each",
        // pronouns
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "its", "our", "their", "what", "which", "who", "whom", "whose",
        // auxiliaries
        "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "has",
        "have", "had", "will", "would", "can", "could", "should", "shall", "may", "might",
        "must",
        // conjunctions and prepositions
        "and", "or", "but", "nor", "so", "yet", "if", "then", "than", "because", "as", "of",
        "to", "in", "on", "at", "by", "for", "with", "from", "into", "about", "over", "not",
        "no", "there", "here", "when", "where", "how", "why",
    ]
    .into_iter()
    .collect()
});

const HUMAN_PATTERNS: &[&str] = &[
    "perhaps",
    "likely",
    "it seems",
    "apparently",
    "generally",
    "typically",
    "quite",
    "rather",
    "fairly",
    "really",
    "actually",
    "basically",
];

/// Contraction endings counted by the heuristic
const CONTRACTION_MARKERS: &[&str] = &["'m", "'re", "'ve"];

const NEUTRAL_SIMILARITY: f64 = 0.5;
const VARIETY_RATIO: f64 = 0.7;
const MIN_KEY_TOKEN_CHARS: usize = 3;
/// Edit similarity only compares this many leading characters of each text
const MAX_SEQUENCE_CHARS: usize = 4_000;

/// Scores a candidate rewrite against its original. Pure and deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer {
    thresholds: QualityThresholds,
}

impl QualityScorer {
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    /// Same floors, with length strictness switched on or off
    pub fn with_strict_length(self, strict: bool) -> Self {
        Self {
            thresholds: self.thresholds.with_strict_length(strict),
        }
    }

    pub fn score(&self, original: &str, candidate: &str) -> QualityReport {
        let original_word_count = word_count(original);
        let candidate_word_count = word_count(candidate);

        let content_similarity = content_similarity(original, candidate);
        let length_ratio = length_ratio(original_word_count, candidate_word_count);
        let length_match = original_word_count == candidate_word_count;
        let has_contractions = has_contractions(candidate);
        let vocabulary_variety = vocabulary_variety(candidate);
        let has_human_patterns = has_human_patterns(candidate);

        let overall_quality = 0.35 * content_similarity
            + 0.25 * if length_match { 1.0 } else { length_ratio * 0.5 }
            + 0.20 * if has_contractions { 1.0 } else { 0.0 }
            + 0.10 * if vocabulary_variety { 1.0 } else { 0.5 }
            + 0.10 * if has_human_patterns { 1.0 } else { 0.0 };
        let overall_quality = overall_quality.clamp(0.0, 1.0);

        let passes_validation =
            self.thresholds
                .passes(content_similarity, overall_quality, length_match);

        QualityReport {
            content_similarity,
            length_ratio,
            length_match,
            has_contractions,
            vocabulary_variety,
            has_human_patterns,
            overall_quality,
            passes_validation,
            original_word_count,
            candidate_word_count,
        }
    }
}

/// Score with default (strict) thresholds
pub fn validate_humanization_quality(original: &str, candidate: &str) -> QualityReport {
    QualityScorer::default().score(original, candidate)
}

/// 0.7 x key-token overlap + 0.3 x normalized edit similarity, clamped to [0, 1].
/// Edit similarity is taken over a bounded prefix of each text.
pub fn content_similarity(original: &str, candidate: &str) -> f64 {
    let original_lower = original.to_lowercase();
    let candidate_lower = candidate.to_lowercase();

    let original_keys = key_tokens(&original_lower);
    let candidate_keys = key_tokens(&candidate_lower);

    if original_keys.is_empty() && candidate_keys.is_empty() {
        return NEUTRAL_SIMILARITY;
    }

    let overlap = key_overlap(&original_keys, &candidate_keys);
    let sequence = sequence_similarity(&original_lower, &candidate_lower);

    (0.7 * overlap + 0.3 * sequence).clamp(0.0, 1.0)
}

fn sequence_similarity(original: &str, candidate: &str) -> f64 {
    strsim::normalized_levenshtein(
        char_prefix(original, MAX_SEQUENCE_CHARS),
        char_prefix(candidate, MAX_SEQUENCE_CHARS),
    )
}

fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn key_tokens(lowercased: &str) -> Vec<&str> {
    TOKEN_RE
        .find_iter(lowercased)
        .map(|m| m.as_str().trim_matches('\''))
        .filter(|t| t.chars().count() >= MIN_KEY_TOKEN_CHARS && !STOP_WORDS.contains(t))
        .collect()
}

/// Shared multiset count over the original's total
fn key_overlap(original: &[&str], candidate: &[&str]) -> f64 {
    if original.is_empty() {
        return 0.0;
    }

    let mut available: HashMap<&str, usize> = HashMap::new();
    for token in candidate {
        *available.entry(*token).or_default() += 1;
    }

    let shared = original
        .iter()
        .filter(|token| match available.get_mut(*token) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        })
        .count();

    shared as f64 / original.len() as f64
}

pub fn length_ratio(original_words: usize, candidate_words: usize) -> f64 {
    let longest = original_words.max(candidate_words);
    if longest == 0 {
        return 0.0;
    }
    original_words.min(candidate_words) as f64 / longest as f64
}

/// Apostrophe present and one of the `'m`/`'re`/`'ve` endings present
pub fn has_contractions(text: &str) -> bool {
    text.contains('\'') && CONTRACTION_MARKERS.iter().any(|marker| text.contains(marker))
}

pub fn vocabulary_variety(text: &str) -> bool {
    let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return false;
    }

    let unique: HashSet<&String> = tokens.iter().collect();
    unique.len() as f64 / tokens.len() as f64 > VARIETY_RATIO
}

pub fn has_human_patterns(text: &str) -> bool {
    let lower = text.to_lowercase();
    HUMAN_PATTERNS.iter().any(|pattern| lower.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_self_score_is_perfect_similarity() {
        let text = "Artificial intelligence is rapidly evolving and transforming our modern society.";
        let report = validate_humanization_quality(text, text);
        assert!((report.content_similarity - 1.0).abs() < EPS);
        assert!(report.length_match);
        assert!((report.length_ratio - 1.0).abs() < EPS);
    }

    #[test]
    fn test_non_latin_self_score_is_perfect_similarity() {
        for text in [
            "Привет мир, это важное сообщение для всех пользователей.",
            "日本語のテキストはとても重要です。",
        ] {
            let report = validate_humanization_quality(text, text);
            assert!((report.content_similarity - 1.0).abs() < EPS, "{text}");
            assert!(report.length_match);
        }
        assert_eq!(key_tokens("важное сообщение"), vec!["важное", "сообщение"]);
    }

    #[test]
    fn test_sequence_term_only_reads_prefix() {
        let shared = "a".repeat(MAX_SEQUENCE_CHARS);
        let original = format!("{shared}{}", "b".repeat(500));
        let candidate = format!("{shared}{}", "c".repeat(900));
        assert!((sequence_similarity(&original, &candidate) - 1.0).abs() < EPS);

        assert_eq!(char_prefix("héllo", 2), "hé");
        assert_eq!(char_prefix("hi", 10), "hi");
    }

    #[test]
    fn test_large_input_scores_quickly() {
        let sentence = "The research team carefully analyzed the quarterly data again. ";
        let text = sentence.repeat(4_000);
        let started = std::time::Instant::now();
        let report = validate_humanization_quality(&text, &text);
        assert!((report.content_similarity - 1.0).abs() < EPS);
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }

    #[test]
    fn test_empty_inputs_are_neutral() {
        let report = validate_humanization_quality("", "");
        assert!((report.content_similarity - NEUTRAL_SIMILARITY).abs() < EPS);
        assert_eq!(report.length_ratio, 0.0);
        assert!(report.length_match);
        assert!(!report.vocabulary_variety);
        assert!(!report.passes_validation);

        let report = validate_humanization_quality("a", "I");
        assert!((report.content_similarity - NEUTRAL_SIMILARITY).abs() < EPS);
    }

    #[test]
    fn test_stop_words_and_short_tokens_ignored() {
        assert_eq!(key_tokens("the cat is on an ox"), vec!["cat"]);
        assert_eq!(key_tokens("'quoted' words"), vec!["quoted", "words"]);
    }

    #[test]
    fn test_key_overlap_is_multiset() {
        assert!((key_overlap(&["data", "data", "model"], &["data", "model"]) - 2.0 / 3.0).abs() < EPS);
        assert_eq!(key_overlap(&[], &["data"]), 0.0);
    }

    #[test]
    fn test_contraction_heuristic_as_documented() {
        assert!(has_contractions("I'm here."));
        assert!(has_contractions("They've left."));
        assert!(!has_contractions("It's done."));
        assert!(!has_contractions("Don't go."));
        assert!(!has_contractions("No apostrophes"));
    }

    #[test]
    fn test_vocabulary_variety_threshold() {
        assert!(vocabulary_variety("one two three four"));
        assert!(!vocabulary_variety("go go go go"));
        assert!(!vocabulary_variety(""));
    }

    #[test]
    fn test_human_patterns_case_insensitive() {
        assert!(has_human_patterns("Perhaps we should."));
        assert!(has_human_patterns("IT SEEMS fine."));
        assert!(!has_human_patterns("Plain statement."));
    }

    #[test]
    fn test_overall_quality_formula() {
        let original = "We are ready to launch the product next week.";
        let candidate = "We're really ready to launch the new product next week.";
        let report = validate_humanization_quality(original, candidate);

        let expected = 0.35 * report.content_similarity
            + 0.25 * (report.length_ratio * 0.5)
            + 0.20
            + 0.10
            + 0.10;
        assert!(!report.length_match);
        assert!(report.has_contractions);
        assert!(report.has_human_patterns);
        assert!(report.vocabulary_variety);
        assert!((report.overall_quality - expected).abs() < EPS);
        assert!(!report.passes_validation);
    }

    #[test]
    fn test_strictness_controls_length_requirement() {
        let original = "We are ready to launch the product next week.";
        let candidate = "We're really ready to launch the new product next week.";
        let relaxed = QualityScorer::default().with_strict_length(false);
        let report = relaxed.score(original, candidate);
        assert_eq!(
            report.passes_validation,
            report.content_similarity >= 0.6 && report.overall_quality >= 0.7
        );
    }
}
