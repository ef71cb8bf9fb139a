//! Text Normalization
//!
//! Cleans typed text before it is matched against the rule table.

/// Normalizes typed text ahead of pattern matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNormalizer {
    /// Lowercase the whole input before matching
    pub lowercase: bool,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TextNormalizer {
    /// Create a new text normalizer
    pub fn new(lowercase: bool) -> Self {
        Self { lowercase }
    }

    /// Trim the input and collapse every whitespace run to a single space
    pub fn normalize(&self, text: &str) -> String {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if self.lowercase {
            collapsed.to_lowercase()
        } else {
            collapsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("  You are   scary \n"), "You are scary");
    }

    #[test]
    fn test_normalize_lowercase() {
        let normalizer = TextNormalizer::new(true);
        assert_eq!(normalizer.normalize("ARE YOU\tThere?"), "are you there?");
    }

    #[test]
    fn test_normalize_empty() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize(" \t "), "");
    }
}
