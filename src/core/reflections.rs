//! Pronoun reflection for captured text
//!
//! "my ship" typed by the operator comes back as "your ship".

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

const REFLECTIONS: &[(&str, &str)] = &[
    ("i am", "you are"),
    ("i was", "you were"),
    ("i", "you"),
    ("i'm", "you are"),
    ("i'd", "you would"),
    ("i've", "you have"),
    ("i'll", "you will"),
    ("my", "your"),
    ("you are", "I am"),
    ("you were", "I was"),
    ("you've", "I have"),
    ("you'll", "I will"),
    ("your", "my"),
    ("yours", "mine"),
    ("you", "me"),
    ("me", "you"),
];

lazy_static! {
    static ref REFLECTION_MAP: HashMap<&'static str, &'static str> =
        REFLECTIONS.iter().copied().collect();

    // Longest keys first so "i am" wins over "i".
    static ref REFLECTION_RE: Regex = {
        let mut keys: Vec<&str> = REFLECTIONS.iter().map(|(k, _)| *k).collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b({})\b", alternation)).expect("static reflection pattern")
    };
}

/// Lowercase `text` and swap first/second person words
pub fn reflect(text: &str) -> String {
    let lowered = text.to_lowercase();
    REFLECTION_RE
        .replace_all(&lowered, |caps: &Captures| {
            let word = &caps[1];
            REFLECTION_MAP.get(word).copied().unwrap_or(word).to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_possessive() {
        assert_eq!(reflect("my friend"), "your friend");
        assert_eq!(reflect("your ship"), "my ship");
    }

    #[test]
    fn test_reflect_prefers_longest_key() {
        assert_eq!(reflect("I am tired"), "you are tired");
        assert_eq!(reflect("you are late"), "I am late");
    }

    #[test]
    fn test_reflect_whole_words_only() {
        assert_eq!(reflect("mystery"), "mystery");
        assert_eq!(reflect("iMac"), "imac");
    }

    #[test]
    fn test_reflect_lowercases() {
        assert_eq!(reflect("SCARY"), "scary");
    }
}
