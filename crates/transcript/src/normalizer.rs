use std::sync::LazyLock;

use regex::Regex;

use crate::NumberWords;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Zа-яА-ЯёЁ0-9]").unwrap());

/// Replace every character that is not a Latin or Russian letter or an ASCII
/// digit with a space.
pub fn clean_text(text: &str) -> String {
    NON_ALPHANUMERIC.replace_all(text, " ").into_owned()
}

/// Maps transcribed digits and number-words to an integer sequence.
#[derive(Debug, Clone)]
pub struct DigitNormalizer {
    words: NumberWords,
}

impl DigitNormalizer {
    pub fn new(words: NumberWords) -> Self {
        Self { words }
    }

    pub fn language(&self) -> &str {
        self.words.language()
    }

    /// Lowercase whitespace-separated tokens of the cleaned text.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        clean_text(text)
            .split_whitespace()
            .map(str::to_lowercase)
            .collect()
    }

    /// True when every token is a digit run or a known number-word.
    pub fn is_numeral_only(&self, text: &str) -> bool {
        self.tokens(text).iter().all(|t| self.token_value(t).is_some())
    }

    /// The integer sequence in token order, or `None` if any token is not a
    /// numeral. Never returns a partial sequence.
    pub fn normalize(&self, text: &str) -> Option<Vec<u32>> {
        self.tokens(text)
            .iter()
            .map(|t| self.token_value(t))
            .collect()
    }

    /// Canonical spoken form of a sequence, space separated.
    pub fn spell(&self, digits: &[u32]) -> Option<String> {
        let words = digits
            .iter()
            .map(|&d| self.words.spell(d))
            .collect::<Option<Vec<_>>>()?;
        Some(words.join(" "))
    }

    fn token_value(&self, token: &str) -> Option<u32> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            return token.parse().ok();
        }
        self.words.get(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn russian() -> DigitNormalizer {
        DigitNormalizer::new(NumberWords::russian())
    }

    #[test]
    fn test_clean_text_strips_punctuation() {
        assert_eq!(clean_text("один, два-три!"), "один  два три ");
        assert_eq!(clean_text("Ёлка ä 5"), "Ёлка   5");
    }

    #[test]
    fn test_normalize_mixed_words_and_digits() {
        let normalizer = russian();
        assert_eq!(
            normalizer.normalize("Один два 3, четыре. Восемь восемь"),
            Some(vec![1, 2, 3, 4, 8, 8])
        );
        assert_eq!(normalizer.normalize("раз 10 десять"), Some(vec![1, 10, 10]));
    }

    #[test]
    fn test_normalize_rejects_non_numeral() {
        let normalizer = russian();
        assert_eq!(normalizer.normalize("один два привет"), None);
        assert!(!normalizer.is_numeral_only("один два привет"));
        assert!(!normalizer.is_numeral_only("one two"));
    }

    #[test]
    fn test_empty_text_is_vacuously_numeral() {
        let normalizer = russian();
        assert!(normalizer.is_numeral_only("  ...  "));
        assert_eq!(normalizer.normalize(""), Some(Vec::new()));
    }

    #[test]
    fn test_spell_then_normalize_round_trip() {
        let normalizer = russian();
        let sequences: [&[u32]; 4] = [&[0], &[1, 2, 3, 4, 8, 8], &[10, 9, 5, 6, 7], &[]];
        for digits in sequences {
            let spoken = normalizer.spell(digits).unwrap();
            assert_eq!(normalizer.normalize(&spoken).as_deref(), Some(digits));
        }
    }

    #[test]
    fn test_gate_and_normalization_agree() {
        let normalizer = russian();
        for text in ["12 три", "99999999999999999999", "семь x", "ДЕВЯТЬ"] {
            assert_eq!(
                normalizer.is_numeral_only(text),
                normalizer.normalize(text).is_some(),
                "{text}"
            );
        }
    }
}
