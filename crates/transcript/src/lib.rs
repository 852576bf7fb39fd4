//! Text side of verification: transcript cleanup, number-word tables,
//! digit normalization and language identification.

mod language;
mod normalizer;
mod number_words;

pub use language::{LanguageIdentifier, ScriptLanguageIdentifier};
pub use normalizer::{clean_text, DigitNormalizer};
pub use number_words::{NumberWord, NumberWords};

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("no number-word table for language '{0}'")]
    UnknownLanguage(String),
    #[error("invalid number word '{word}': {message}")]
    InvalidWord { word: String, message: String },
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
