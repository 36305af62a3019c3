//! Length balancer: bounded post-pass nudging word count toward the original

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::casing::capitalize_first;
use crate::rules::{INSERTABLE_FILLERS, REMOVABLE_FILLERS};

/// What the balancer did to a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "words")]
pub enum Adjustment {
    None,
    Removed(usize),
    Inserted(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balanced {
    pub text: String,
    pub adjustment: Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthBalancer {
    /// Relative drift tolerated before acting
    pub tolerance: f64,
    pub max_removals: usize,
    pub max_insertions: usize,
}

impl Default for LengthBalancer {
    fn default() -> Self {
        Self {
            tolerance: 0.2,
            max_removals: 3,
            max_insertions: 2,
        }
    }
}

impl LengthBalancer {
    /// Best-effort nudge; an exact match is possible but never guaranteed.
    pub fn balance<R: Rng + ?Sized>(
        &self,
        candidate: &str,
        original_words: usize,
        rng: &mut R,
    ) -> Balanced {
        let mut tokens: Vec<String> = candidate.split_whitespace().map(str::to_string).collect();
        let current = tokens.len();
        let unchanged = || Balanced {
            text: candidate.to_string(),
            adjustment: Adjustment::None,
        };

        if original_words == 0 {
            return unchanged();
        }

        let upper = original_words as f64 * (1.0 + self.tolerance);
        let lower = original_words as f64 * (1.0 - self.tolerance);

        if current as f64 > upper {
            let budget = self.max_removals.min(current - original_words);
            let removed = remove_fillers(&mut tokens, budget);
            if removed == 0 {
                return unchanged();
            }
            return Balanced {
                text: tokens.join(" "),
                adjustment: Adjustment::Removed(removed),
            };
        }

        if (current as f64) < lower {
            let count = self.max_insertions.min(original_words - current);
            let mid = tokens.len() / 2;
            for offset in 0..count {
                let filler = INSERTABLE_FILLERS.choose(rng).copied().unwrap_or("really");
                tokens.insert(mid + offset, filler.to_string());
            }
            return Balanced {
                text: tokens.join(" "),
                adjustment: Adjustment::Inserted(count),
            };
        }

        unchanged()
    }
}

/// Remove bare filler tokens, each filler at most once, up to `budget`
fn remove_fillers(tokens: &mut Vec<String>, budget: usize) -> usize {
    let mut removed = 0;

    for filler in REMOVABLE_FILLERS {
        if removed >= budget {
            break;
        }

        let Some(index) = tokens.iter().position(|t| t.eq_ignore_ascii_case(filler)) else {
            continue;
        };

        let token = tokens.remove(index);
        let was_capitalized = token.chars().next().is_some_and(char::is_uppercase);
        if was_capitalized {
            if let Some(next) = tokens.get_mut(index) {
                *next = capitalize_first(next);
            }
        }
        removed += 1;
    }

    removed
}
