//! Sentence segmentation capability

/// Splits text into an ordered sequence of sentence strings.
///
/// Implementations must not drop words: joining the returned sentences with
/// whitespace yields the same word sequence as the input.
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}
