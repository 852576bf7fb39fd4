//! Verifier configuration, loadable from a JSON file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use voxgate_audio::QualityThresholds;
use voxgate_transcript::{NumberWords, TranscriptError};
use voxgate_vad::VadSettings;

use crate::{
    Locale, DEFAULT_LANGUAGE, DEFAULT_SILENCE_THRESHOLD, DEFAULT_TRANSCRIPTION_TIMEOUT_MS,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    Validation(String),
    #[error("Number words: {0}")]
    NumberWords(#[from] TranscriptError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    pub silence_threshold: f64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// ISO 639-1 code the digits must be spoken in.
    pub language: String,
    /// Language of rejection messages.
    pub locale: Locale,
    pub quality: QualityThresholds,
    pub vad: VadSettings,
    pub noise: NoiseSettings,
    pub transcription_timeout_ms: u64,
    /// Replaces the built-in number-word table for `language`.
    pub number_words: Option<NumberWords>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            locale: Locale::default(),
            quality: QualityThresholds::default(),
            vad: VadSettings::default(),
            noise: NoiseSettings::default(),
            transcription_timeout_ms: DEFAULT_TRANSCRIPTION_TIMEOUT_MS,
            number_words: None,
        }
    }
}

impl VerifierConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::info!(path = %path.display(), language = %config.language, "Loaded verifier config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language.trim().is_empty() {
            return Err(ConfigError::Validation("language is required".to_string()));
        }

        let quiet = self.quality.quiet_threshold;
        if !quiet.is_finite() {
            return Err(ConfigError::Validation(format!(
                "quality.quiet_threshold must be finite, got {quiet}"
            )));
        }

        let overload = self.quality.overload_threshold;
        if !(overload > 0.0 && overload <= 1.0) {
            return Err(ConfigError::Validation(format!(
                "quality.overload_threshold must be in (0, 1], got {overload}"
            )));
        }

        let silence = self.noise.silence_threshold;
        if !silence.is_finite() || silence < 0.0 {
            return Err(ConfigError::Validation(format!(
                "noise.silence_threshold must be a non-negative number, got {silence}"
            )));
        }

        if self.transcription_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "transcription_timeout_ms must be positive".to_string(),
            ));
        }

        if let Some(words) = &self.number_words {
            if words.language() != self.language {
                return Err(ConfigError::Validation(format!(
                    "number_words is for '{}' but language is '{}'",
                    words.language(),
                    self.language
                )));
            }
            words.validate()?;
        }

        Ok(())
    }

    /// The configured override, or the built-in table for `language`.
    pub fn number_words(&self) -> Result<NumberWords, ConfigError> {
        match &self.number_words {
            Some(words) => Ok(words.clone()),
            None => Ok(NumberWords::for_language(&self.language)?),
        }
    }

    pub fn transcription_timeout(&self) -> Duration {
        Duration::from_millis(self.transcription_timeout_ms)
    }
}
