/// Identifies the language of a transcript.
pub trait LanguageIdentifier: Send + Sync {
    /// ISO 639-1 code, or `None` when the text carries no usable signal.
    fn identify(&self, text: &str) -> Option<String>;
}

/// Script-based identifier: Cyrillic text is Russian, Latin text is English.
///
/// Only the writing system is detected. Ukrainian, Bulgarian or Serbian
/// Cyrillic all come back as `ru`; plug in a statistical identifier through
/// [`LanguageIdentifier`] when those must be told apart.
///
/// Text without any letters (a run of digits) resolves to the fallback
/// language, since digits alone are valid in any language.
#[derive(Debug, Clone)]
pub struct ScriptLanguageIdentifier {
    fallback: Option<String>,
}

impl ScriptLanguageIdentifier {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: Some(fallback.into()),
        }
    }

    pub fn without_fallback() -> Self {
        Self { fallback: None }
    }
}

impl LanguageIdentifier for ScriptLanguageIdentifier {
    fn identify(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        let (cyrillic, latin) = text.chars().filter(|c| c.is_alphabetic()).fold(
            (0usize, 0usize),
            |(cyr, lat), c| match c {
                '\u{0400}'..='\u{04FF}' => (cyr + 1, lat),
                c if c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{024F}').contains(&c) => {
                    (cyr, lat + 1)
                }
                _ => (cyr, lat),
            },
        );

        let language = if cyrillic > latin {
            Some("ru".to_string())
        } else if latin > cyrillic {
            Some("en".to_string())
        } else {
            self.fallback.clone()
        };

        tracing::debug!(cyrillic, latin, ?language, "Identified transcript language");
        language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyrillic_is_russian() {
        let id = ScriptLanguageIdentifier::new("ru");
        assert_eq!(id.identify("один два три").as_deref(), Some("ru"));
    }

    #[test]
    fn test_latin_is_english() {
        let id = ScriptLanguageIdentifier::new("ru");
        assert_eq!(id.identify("one two three").as_deref(), Some("en"));
    }

    #[test]
    fn test_other_cyrillic_languages_read_as_russian() {
        let id = ScriptLanguageIdentifier::new("ru");
        assert_eq!(id.identify("чотири п'ять ї").as_deref(), Some("ru"));
    }

    #[test]
    fn test_digits_use_fallback() {
        assert_eq!(
            ScriptLanguageIdentifier::new("ru").identify("1 2 3").as_deref(),
            Some("ru")
        );
        assert_eq!(
            ScriptLanguageIdentifier::without_fallback().identify("1 2 3"),
            None
        );
    }

    #[test]
    fn test_empty_is_absent() {
        let id = ScriptLanguageIdentifier::new("ru");
        assert_eq!(id.identify(""), None);
        assert_eq!(id.identify("   "), None);
    }
}
