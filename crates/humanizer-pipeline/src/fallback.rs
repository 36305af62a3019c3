//! Minimal contraction-only rewrite, used when the full pipeline cannot run

use crate::rules::CONTRACTION_PAIRS;

/// Replace space-delimited formal phrases with their contractions.
///
/// Only occurrences preceded by a space and followed by a space, period or
/// comma are touched.
pub fn basic_contractions(text: &str) -> String {
    let mut result = text.to_string();

    for (formal, informal) in CONTRACTION_PAIRS {
        for trailer in [' ', '.', ','] {
            let from = format!(" {formal}{trailer}");
            if result.contains(&from) {
                result = result.replace(&from, &format!(" {informal}{trailer}"));
            }
        }
    }

    result
}
