//! Capitalization helpers shared by the transform stages

/// Uppercase the first character
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character unless the opening word must stay capitalized
/// (the pronoun "I" and its contractions, or an acronym).
pub fn decapitalize_first(s: &str) -> String {
    let first_word = s.split_whitespace().next().unwrap_or("");
    if keeps_capital(first_word) {
        return s.to_string();
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Give `replacement` the leading capitalization of `matched`
pub fn match_case(matched: &str, replacement: &str) -> String {
    let starts_upper = matched.chars().next().is_some_and(char::is_uppercase);
    if starts_upper {
        capitalize_first(replacement)
    } else {
        replacement.to_string()
    }
}

fn keeps_capital(word: &str) -> bool {
    let core: String = word.chars().take_while(|c| c.is_alphanumeric() || *c == '\'').collect();
    if core == "I" || core.starts_with("I'") {
        return true;
    }

    let letters: Vec<char> = core.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}
