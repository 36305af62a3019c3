//! Punctuation-based sentence segmenter

use humanizer_core::SentenceSegmenter;

const TERMINATORS: &[char] = &['.', '!', '?'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "no", "fig",
];

/// Splits after `.`, `!` or `?` (plus any closing quotes or brackets) when the
/// next word does not start in lowercase and the period does not end a known
/// abbreviation or a single-letter initial.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl PunctuationSegmenter {
    pub fn new() -> Self {
        Self
    }

    fn ends_with_abbreviation(fragment: &str) -> bool {
        let Some(last) = fragment.split_whitespace().last() else {
            return false;
        };
        if !last.ends_with('.') {
            return false;
        }

        let word = last
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .trim_end_matches('.')
            .to_lowercase();

        let is_initial = word.chars().count() == 1 && word.chars().all(char::is_alphabetic);
        is_initial || ABBREVIATIONS.contains(&word.as_str())
    }
}

impl SentenceSegmenter for PunctuationSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !TERMINATORS.contains(&chars[i].1) {
                i += 1;
                continue;
            }

            let mut end = i + 1;
            while end < chars.len()
                && (TERMINATORS.contains(&chars[end].1) || CLOSERS.contains(&chars[end].1))
            {
                end += 1;
            }

            if end >= chars.len() || !chars[end].1.is_whitespace() {
                i = end;
                continue;
            }

            let mut next = end;
            while next < chars.len() && chars[next].1.is_whitespace() {
                next += 1;
            }

            let boundary = chars[end].0;
            let next_lowercase = next < chars.len() && chars[next].1.is_lowercase();
            let fragment = &text[start..boundary];

            if !next_lowercase && !(chars[i].1 == '.' && Self::ends_with_abbreviation(fragment)) {
                push_trimmed(&mut sentences, fragment);
                start = chars.get(next).map_or(text.len(), |(idx, _)| *idx);
            }
            i = next;
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        let segmenter = PunctuationSegmenter::new();
        let sentences = segmenter.segment("It rained. We stayed in! Did you? Yes.");
        assert_eq!(sentences, vec!["It rained.", "We stayed in!", "Did you?", "Yes."]);
    }

    #[test]
    fn test_abbreviations_and_initials() {
        let segmenter = PunctuationSegmenter::new();
        let sentences = segmenter.segment("Dr. Smith met J. Doe today. They talked.");
        assert_eq!(sentences, vec!["Dr. Smith met J. Doe today.", "They talked."]);
    }

    #[test]
    fn test_closing_quotes_stay_with_sentence() {
        let segmenter = PunctuationSegmenter::new();
        let sentences = segmenter.segment("He said \"stop.\" Then he left.");
        assert_eq!(sentences, vec!["He said \"stop.\"", "Then he left."]);
    }

    #[test]
    fn test_decimal_and_lowercase_continuations() {
        let segmenter = PunctuationSegmenter::new();
        let sentences = segmenter.segment("Pi is 3.14 or so. and more text");
        assert_eq!(sentences, vec!["Pi is 3.14 or so. and more text"]);
    }

    #[test]
    fn test_words_preserved() {
        let segmenter = PunctuationSegmenter::new();
        let text = "First  line here.\n\nSecond paragraph starts. Third one";
        let joined = segmenter.segment(text).join(" ");
        assert_eq!(
            joined.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_blank_input() {
        assert!(PunctuationSegmenter::new().segment("   ").is_empty());
    }
}
