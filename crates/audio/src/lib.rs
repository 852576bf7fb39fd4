mod quality;
mod resample;
mod transcode;
mod waveform;

pub use quality::{estimate_quality, QualityReport, QualityThresholds, QualityVerdict};
pub use resample::resample;
pub use transcode::{canonical_path, ensure_canonical, SymphoniaTranscoder, Transcoder};
pub use waveform::Waveform;

/// Canonical sample rate for every stage of the pipeline.
pub const SAMPLE_RATE: u32 = 16000;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("no audio track in {0}")]
    NoAudioTrack(String),
    #[error("resample error: {0}")]
    Resample(String),
}

pub type Result<T> = std::result::Result<T, AudioError>;
