mod engine;
#[cfg(feature = "whisper")]
mod whisper;

pub use engine::{segments_text, Segment, SttEngine, STT_SAMPLE_RATE};
#[cfg(feature = "whisper")]
pub use whisper::WhisperEngine;

#[derive(Debug, thiserror::Error)]
pub enum SttError {
    #[error("model not loaded: {0}")]
    ModelNotLoaded(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("audio error: {0}")]
    Audio(#[from] voxgate_audio::AudioError),
}

pub type Result<T> = std::result::Result<T, SttError>;
