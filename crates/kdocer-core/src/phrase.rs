//! Identifier → natural-language phrase conversion.
//!
//! Two shapes are recognized:
//!
//! - **all-caps** (`MAX_VALUE`, `HTTP_URL`): split on `_`, every segment
//!   title-cased on its own, joined with single spaces.
//! - **mixed** (`getUserName`): split where a lowercase letter is directly
//!   followed by an uppercase one, lowercased, first character capitalized.
//!
//! Acronym runs are never split internally: `URLParser` → `Urlparser`.

/// Convert a declaration name into the summary phrase used in a doc block.
///
/// Never fails; the empty string maps to the empty string.
pub fn to_phrase(identifier: &str) -> String {
    if is_all_upper_case(identifier) {
        return all_caps_phrase(identifier);
    }
    mixed_phrase(identifier)
}

/// True when no character of `s` is lowercase. Digits, separators and the
/// empty string all count as upper case.
fn is_all_upper_case(s: &str) -> bool {
    !s.chars().any(char::is_lowercase)
}

fn all_caps_phrase(name: &str) -> String {
    name.split('_')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn mixed_phrase(name: &str) -> String {
    let mut phrase = String::with_capacity(name.len() + 4);
    for word in camel_words(name) {
        phrase.push_str(&word.to_lowercase());
        phrase.push(' ');
    }
    // every word carries a trailing separator; drop the last one
    phrase.pop();
    capitalize(&phrase)
}

/// Split at lowercase→uppercase transitions only.
fn camel_words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (idx, c) in name.char_indices() {
        if let Some(p) = prev {
            if p.is_lowercase() && c.is_uppercase() {
                words.push(&name[start..idx]);
                start = idx;
            }
        }
        prev = Some(c);
    }
    words.push(&name[start..]);
    words
}

/// First character upper, the rest lower.
fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// First character upper, the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
