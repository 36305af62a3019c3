//! Structural transform engine: sentence-level restructuring

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use humanizer_core::word_count;

use crate::casing::{capitalize_first, decapitalize_first};
use crate::rules::{CONNECTORS, DETERMINERS, QUALIFIERS};

/// Tunables for the structural pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructuralConfig {
    pub qualifier_probability: f64,
    /// Qualifiers only go on sentences with more words than this
    pub qualifier_min_words: usize,
    pub reorder_probability: f64,
    /// Both clauses must have more words than this to be swapped
    pub clause_min_words: usize,
    pub merge_probability: f64,
    /// Both sentences must have fewer words than this to be merged
    pub merge_max_words: usize,
}

impl Default for StructuralConfig {
    fn default() -> Self {
        Self {
            qualifier_probability: 0.3,
            qualifier_min_words: 8,
            reorder_probability: 0.3,
            clause_min_words: 3,
            merge_probability: 0.5,
            merge_max_words: 6,
        }
    }
}

/// What happened to a single sentence during one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceTransform {
    Unchanged,
    QualifierInserted,
    ClauseReordered,
}

/// Result of one structural pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralOutcome {
    pub text: String,
    pub transforms: Vec<SentenceTransform>,
    /// Index of the first sentence of a merged pair
    pub merged_at: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct StructuralTransformer {
    config: StructuralConfig,
}

impl StructuralTransformer {
    pub fn new(config: StructuralConfig) -> Self {
        Self { config }
    }

    /// Apply at most one transform per sentence, then (when length may change)
    /// at most one merge of adjacent short sentences.
    ///
    /// `preserve_length` selects clause reordering; otherwise sentence merging
    /// is used. The two never run in the same pass.
    pub fn transform<R: Rng + ?Sized>(
        &self,
        sentences: &[String],
        preserve_length: bool,
        rng: &mut R,
    ) -> StructuralOutcome {
        let mut output = Vec::with_capacity(sentences.len());
        let mut transforms = Vec::with_capacity(sentences.len());

        for sentence in sentences {
            let (text, transform) = self.transform_sentence(sentence, preserve_length, rng);
            output.push(text);
            transforms.push(transform);
        }

        let merged_at = if preserve_length {
            None
        } else {
            self.merge_first_short_pair(&mut output, rng)
        };

        StructuralOutcome {
            text: output.join(" "),
            transforms,
            merged_at,
        }
    }

    fn transform_sentence<R: Rng + ?Sized>(
        &self,
        sentence: &str,
        preserve_length: bool,
        rng: &mut R,
    ) -> (String, SentenceTransform) {
        if self.accepts_qualifier(sentence) && rng.gen_bool(self.config.qualifier_probability) {
            if let Some(qualifier) = QUALIFIERS.choose(rng) {
                return (insert_qualifier(sentence, qualifier), SentenceTransform::QualifierInserted);
            }
        }

        if preserve_length {
            if let Some(reordered) = self.reorder_clauses(sentence) {
                if rng.gen_bool(self.config.reorder_probability) {
                    return (reordered, SentenceTransform::ClauseReordered);
                }
            }
        }

        (sentence.to_string(), SentenceTransform::Unchanged)
    }

    fn accepts_qualifier(&self, sentence: &str) -> bool {
        if word_count(sentence) <= self.config.qualifier_min_words {
            return false;
        }

        let first = sentence
            .split_whitespace()
            .next()
            .unwrap_or("")
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        DETERMINERS.contains(&first.as_str())
    }

    /// Swap the clauses around the first comma, keeping terminal punctuation last
    pub fn reorder_clauses(&self, sentence: &str) -> Option<String> {
        let (head, tail) = sentence.split_once(',')?;
        let head = head.trim();
        let (tail_core, terminal) = split_terminal(tail.trim());
        let tail_core = tail_core.trim_end_matches([',', ';', ':']).trim();

        if word_count(head) <= self.config.clause_min_words
            || word_count(tail_core) <= self.config.clause_min_words
        {
            return None;
        }

        Some(format!(
            "{}, {}{}",
            capitalize_first(tail_core),
            decapitalize_first(head),
            terminal
        ))
    }

    fn merge_first_short_pair<R: Rng + ?Sized>(
        &self,
        sentences: &mut Vec<String>,
        rng: &mut R,
    ) -> Option<usize> {
        let index = sentences.windows(2).position(|pair| {
            pair[0].ends_with('.')
                && word_count(&pair[0]) < self.config.merge_max_words
                && word_count(&pair[1]) < self.config.merge_max_words
        })?;

        if !rng.gen_bool(self.config.merge_probability) {
            return None;
        }

        let connector = CONNECTORS.choose(rng)?;
        let second = sentences.remove(index + 1);
        let (first_core, _) = split_terminal(&sentences[index]);
        let merged = format!("{}{} {}", first_core, connector, decapitalize_first(&second));
        sentences[index] = merged;
        Some(index)
    }
}

/// Prepend a hedging phrase, lower-casing the original start
fn insert_qualifier(sentence: &str, qualifier: &str) -> String {
    format!("{}, {}", capitalize_first(qualifier), decapitalize_first(sentence))
}

/// Split trailing `.`, `!`, `?` and closing quotes from the body
fn split_terminal(sentence: &str) -> (&str, &str) {
    let body = sentence.trim_end_matches(['.', '!', '?', '"', '\'', '\u{201d}']);
    sentence.split_at(body.len())
}
