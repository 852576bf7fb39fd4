use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use voxgate_audio::QualityReport;
use voxgate_vad::NoiseFloor;

/// Language of rejection messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

/// Why a recording was rejected. Callers should branch on the variant and
/// treat the message text as presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TooQuiet,
    TooLoud,
    WrongLanguage,
    NotDigits,
    BackgroundNoise,
    DigitsMismatch,
    ProcessingTimedOut,
    Unprocessable,
}

impl RejectReason {
    /// Stable identifier, identical to the serialized form.
    pub fn code(self) -> &'static str {
        match self {
            Self::TooQuiet => "too_quiet",
            Self::TooLoud => "too_loud",
            Self::WrongLanguage => "wrong_language",
            Self::NotDigits => "not_digits",
            Self::BackgroundNoise => "background_noise",
            Self::DigitsMismatch => "digits_mismatch",
            Self::ProcessingTimedOut => "processing_timed_out",
            Self::Unprocessable => "unprocessable",
        }
    }

    /// User-facing text. `language` is the ISO 639-1 code the digits were
    /// expected in; only `WrongLanguage` mentions it.
    pub fn message(self, locale: Locale, language: &str) -> String {
        if self == Self::WrongLanguage {
            return match locale {
                Locale::Ru => match language_name(language, locale) {
                    Some(name) => format!("Произносите указанные цифры на {name} языке"),
                    None => format!("Произносите указанные цифры на языке «{language}»"),
                },
                Locale::En => {
                    let name = language_name(language, locale).unwrap_or(language);
                    format!("Speak the indicated digits in {name}")
                }
            };
        }

        let text = match locale {
            Locale::Ru => match self {
                Self::TooQuiet => "Говорите громче или переместитесь в более тихое место",
                Self::TooLoud => "Говорите тише или отодвиньте телефон от лица",
                Self::NotDigits | Self::DigitsMismatch => {
                    "Произносите только указанные на экране цифры"
                }
                Self::BackgroundNoise => "Посторонние шумы. Переместитесь в более тихое место",
                Self::ProcessingTimedOut => {
                    "Превышено время обработки записи. Попробуйте ещё раз"
                }
                Self::Unprocessable | Self::WrongLanguage => "Не удалось обработать запись",
            },
            Locale::En => match self {
                Self::TooQuiet => "Speak louder or move to a quieter location",
                Self::TooLoud => "Speak more softly or move the device away",
                Self::NotDigits | Self::DigitsMismatch => {
                    "Speak only the digits shown on the screen"
                }
                Self::BackgroundNoise => "Background noise detected; move to a quieter location",
                Self::ProcessingTimedOut => "Processing timed out; please try again",
                Self::Unprocessable | Self::WrongLanguage => "Could not process recording",
            },
        };
        text.to_string()
    }
}

/// Language name as it fits the message template (Russian uses the
/// prepositional case).
fn language_name(code: &str, locale: Locale) -> Option<&'static str> {
    let name = match (locale, code) {
        (Locale::Ru, "ru") => "русском",
        (Locale::Ru, "en") => "английском",
        (Locale::En, "ru") => "Russian",
        (Locale::En, "en") => "English",
        _ => return None,
    };
    Some(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail(RejectReason),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Pass => None,
            Self::Fail(reason) => Some(*reason),
        }
    }

    pub fn message(&self, locale: Locale, language: &str) -> Option<String> {
        self.reason().map(|r| r.message(locale, language))
    }
}

/// Verdict plus whatever the pipeline measured before it stopped.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub verdict: Verdict,
    pub canonical_path: Option<PathBuf>,
    pub quality: Option<QualityReport>,
    /// Cleaned transcript; empty when the engine produced nothing.
    pub transcript: Option<String>,
    pub language: Option<String>,
    pub recognized: Option<Vec<u32>>,
    pub noise: Option<NoiseFloor>,
    /// Rejection text in the configured locale; `None` on pass.
    pub message: Option<String>,
}

impl VerificationReport {
    pub(crate) fn new() -> Self {
        Self {
            verdict: Verdict::Fail(RejectReason::Unprocessable),
            canonical_path: None,
            quality: None,
            transcript: None,
            language: None,
            recognized: None,
            noise: None,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [RejectReason; 8] = [
        RejectReason::TooQuiet,
        RejectReason::TooLoud,
        RejectReason::WrongLanguage,
        RejectReason::NotDigits,
        RejectReason::BackgroundNoise,
        RejectReason::DigitsMismatch,
        RejectReason::ProcessingTimedOut,
        RejectReason::Unprocessable,
    ];

    #[test]
    fn test_code_matches_serialized_form() {
        for reason in ALL {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.code()));
        }
    }

    #[test]
    fn test_every_reason_has_messages() {
        for reason in ALL {
            assert!(!reason.message(Locale::Ru, "ru").is_empty());
            assert!(!reason.message(Locale::En, "ru").is_empty());
        }
        assert_eq!(
            RejectReason::NotDigits.message(Locale::En, "ru"),
            RejectReason::DigitsMismatch.message(Locale::En, "ru")
        );
    }

    #[test]
    fn test_wrong_language_names_target_language() {
        let reason = RejectReason::WrongLanguage;
        assert_eq!(
            reason.message(Locale::En, "ru"),
            "Speak the indicated digits in Russian"
        );
        assert_eq!(
            reason.message(Locale::En, "en"),
            "Speak the indicated digits in English"
        );
        assert_eq!(
            reason.message(Locale::Ru, "ru"),
            "Произносите указанные цифры на русском языке"
        );
        assert_eq!(
            reason.message(Locale::Ru, "en"),
            "Произносите указанные цифры на английском языке"
        );
        assert!(reason.message(Locale::En, "kk").ends_with("in kk"));
        assert!(reason.message(Locale::Ru, "kk").contains("«kk»"));
    }

    #[test]
    fn test_verdict_json_shape() {
        assert_eq!(
            serde_json::to_string(&Verdict::Pass).unwrap(),
            r#"{"status":"pass"}"#
        );
        assert_eq!(
            serde_json::to_string(&Verdict::Fail(RejectReason::TooLoud)).unwrap(),
            r#"{"status":"fail","reason":"too_loud"}"#
        );
    }

    #[test]
    fn test_verdict_accessors() {
        assert!(Verdict::Pass.is_pass());
        assert_eq!(Verdict::Pass.message(Locale::Ru, "ru"), None);
        let fail = Verdict::Fail(RejectReason::BackgroundNoise);
        assert_eq!(fail.reason(), Some(RejectReason::BackgroundNoise));
        assert!(fail.message(Locale::En, "ru").unwrap().contains("noise"));
    }
}
