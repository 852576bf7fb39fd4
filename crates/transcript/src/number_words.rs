use serde::{Deserialize, Serialize};

use crate::{Result, TranscriptError};

const RUSSIAN: &[(&str, u32)] = &[
    ("ноль", 0),
    ("нуль", 0),
    ("один", 1),
    ("раз", 1),
    ("два", 2),
    ("три", 3),
    ("четыре", 4),
    ("пять", 5),
    ("шесть", 6),
    ("семь", 7),
    ("восемь", 8),
    ("девять", 9),
    ("десять", 10),
];

const ENGLISH: &[(&str, u32)] = &[
    ("zero", 0),
    ("oh", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberWord {
    pub word: String,
    pub value: u32,
}

/// Immutable mapping from spoken number-words to values for one language.
///
/// The first word listed for a value is its canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberWords {
    language: String,
    words: Vec<NumberWord>,
}

impl NumberWords {
    pub fn new(language: impl Into<String>, words: Vec<NumberWord>) -> Result<Self> {
        let table = Self {
            language: language.into(),
            words: words
                .into_iter()
                .map(|w| NumberWord {
                    word: w.word.to_lowercase(),
                    value: w.value,
                })
                .collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Built-in table for an ISO 639-1 language code.
    pub fn for_language(language: &str) -> Result<Self> {
        match language {
            "ru" => Ok(Self::builtin("ru", RUSSIAN)),
            "en" => Ok(Self::builtin("en", ENGLISH)),
            other => Err(TranscriptError::UnknownLanguage(other.to_string())),
        }
    }

    pub fn russian() -> Self {
        Self::builtin("ru", RUSSIAN)
    }

    fn builtin(language: &str, entries: &[(&str, u32)]) -> Self {
        Self {
            language: language.to_string(),
            words: entries
                .iter()
                .map(|&(word, value)| NumberWord {
                    word: word.to_string(),
                    value,
                })
                .collect(),
        }
    }

    /// Words must be single lowercase alphabetic tokens and unique.
    pub fn validate(&self) -> Result<()> {
        for (i, entry) in self.words.iter().enumerate() {
            let invalid = |message: &str| TranscriptError::InvalidWord {
                word: entry.word.clone(),
                message: message.to_string(),
            };
            if entry.word.is_empty() || !entry.word.chars().all(char::is_alphabetic) {
                return Err(invalid("must be a single alphabetic token"));
            }
            if entry.word != entry.word.to_lowercase() {
                return Err(invalid("must be lowercase"));
            }
            if self.words[..i].iter().any(|w| w.word == entry.word) {
                return Err(invalid("listed twice"));
            }
        }
        Ok(())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn words(&self) -> &[NumberWord] {
        &self.words
    }

    /// Value of a lowercase token.
    pub fn get(&self, token: &str) -> Option<u32> {
        self.words
            .iter()
            .find(|w| w.word == token)
            .map(|w| w.value)
    }

    /// Canonical word for a value.
    pub fn spell(&self, value: u32) -> Option<&str> {
        self.words
            .iter()
            .find(|w| w.value == value)
            .map(|w| w.word.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_russian_covers_zero_to_ten() {
        let table = NumberWords::russian();
        for value in 0..=10 {
            let word = table.spell(value).unwrap();
            assert_eq!(table.get(word), Some(value));
        }
        assert_eq!(table.get("раз"), Some(1));
        assert_eq!(table.spell(1), Some("один"));
        assert_eq!(table.get("одиннадцать"), None);
    }

    #[test]
    fn test_unknown_language() {
        assert!(matches!(
            NumberWords::for_language("de"),
            Err(TranscriptError::UnknownLanguage(code)) if code == "de"
        ));
    }

    #[test]
    fn test_custom_table_is_lowercased() {
        let table = NumberWords::new(
            "ru",
            vec![NumberWord {
                word: "Разок".to_string(),
                value: 1,
            }],
        )
        .unwrap();
        assert_eq!(table.get("разок"), Some(1));
    }

    #[test]
    fn test_custom_table_rejects_phrases_and_duplicates() {
        let phrase = NumberWords::new(
            "en",
            vec![NumberWord {
                word: "twenty one".to_string(),
                value: 21,
            }],
        );
        assert!(phrase.is_err());

        let duplicate = NumberWords::new(
            "en",
            vec![
                NumberWord {
                    word: "one".to_string(),
                    value: 1,
                },
                NumberWord {
                    word: "one".to_string(),
                    value: 2,
                },
            ],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_table_deserializes_from_json() {
        let json = r#"{"language":"ru","words":[{"word":"ноль","value":0}]}"#;
        let table: NumberWords = serde_json::from_str(json).unwrap();
        assert!(table.validate().is_ok());
        assert_eq!(table.get("ноль"), Some(0));
    }
}
