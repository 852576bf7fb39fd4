//! Frame-level voice activity segmentation and noise-floor analysis.

mod noise;
mod segmenter;
mod settings;
mod webrtc;

pub use noise::{frame_variance, NoiseFloor};
pub use segmenter::{Frame, Segmenter, Segments};
pub use settings::{Aggressiveness, FrameDuration, VadSampleRate, VadSettings};
pub use webrtc::{WebRtcClassifier, WebRtcClassifierFactory};

#[derive(Debug, thiserror::Error)]
pub enum VadError {
    #[error("unsupported sample rate: {0} Hz")]
    UnsupportedSampleRate(u32),
    #[error("unsupported frame duration: {0} ms")]
    UnsupportedFrameDuration(u32),
    #[error("unsupported aggressiveness: {0}")]
    UnsupportedAggressiveness(u8),
    #[error("invalid frame length: expected {expected}, got {actual}")]
    InvalidFrameLength { expected: usize, actual: usize },
    #[error("classifier error: {0}")]
    Classifier(String),
}

pub type Result<T> = std::result::Result<T, VadError>;

/// Speech / non-speech decision for a single PCM frame.
///
/// The sample rate and frame length are fixed when the classifier is built.
pub trait FrameClassifier {
    fn is_speech(&mut self, frame: &[i16]) -> Result<bool>;
}

/// Builds a fresh classifier per run. Classifiers may be stateful and
/// `!Send`, so they are never shared between verifications.
pub trait ClassifierFactory: Send + Sync {
    fn create(&self, settings: &VadSettings) -> Result<Box<dyn FrameClassifier>>;
}
