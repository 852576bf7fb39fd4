use std::path::Path;

use voxgate_audio::Waveform;

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Standard sample rate for STT processing.
pub const STT_SAMPLE_RATE: u32 = voxgate_audio::SAMPLE_RATE;

pub trait SttEngine: Send + Sync {
    /// Transcribe audio samples (expected at 16kHz mono).
    ///
    /// `language` is an ISO 639-1 hint such as `"ru"`.
    fn transcribe(&self, audio: &[f32], language: &str) -> crate::Result<Vec<Segment>>;

    /// Transcribe an audio file directly.
    ///
    /// Default implementation loads the WAV at 16kHz and calls `transcribe()`.
    fn transcribe_file(&self, path: &Path, language: &str) -> crate::Result<Vec<Segment>> {
        let waveform = Waveform::load(path, STT_SAMPLE_RATE)?;
        self.transcribe(waveform.samples(), language)
    }

    fn model_name(&self) -> &str;
}

/// Join segment texts into a single space-separated transcript.
pub fn segments_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.text.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
