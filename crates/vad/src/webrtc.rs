use webrtc_vad::{SampleRate, Vad, VadMode};

use crate::{
    Aggressiveness, ClassifierFactory, FrameClassifier, Result, VadError, VadSampleRate,
    VadSettings,
};

impl From<VadSampleRate> for SampleRate {
    fn from(rate: VadSampleRate) -> Self {
        match rate {
            VadSampleRate::Hz8000 => SampleRate::Rate8kHz,
            VadSampleRate::Hz16000 => SampleRate::Rate16kHz,
            VadSampleRate::Hz32000 => SampleRate::Rate32kHz,
            VadSampleRate::Hz48000 => SampleRate::Rate48kHz,
        }
    }
}

impl From<Aggressiveness> for VadMode {
    fn from(level: Aggressiveness) -> Self {
        match level {
            Aggressiveness::Quality => VadMode::Quality,
            Aggressiveness::LowBitrate => VadMode::LowBitrate,
            Aggressiveness::Aggressive => VadMode::Aggressive,
            Aggressiveness::VeryAggressive => VadMode::VeryAggressive,
        }
    }
}

/// WebRTC GMM-based frame classifier.
///
/// The underlying `Vad` is `!Send`; build one per verification.
pub struct WebRtcClassifier {
    vad: Vad,
    frame_len: usize,
}

impl WebRtcClassifier {
    pub fn new(settings: &VadSettings) -> Self {
        let vad =
            Vad::new_with_rate_and_mode(settings.sample_rate.into(), settings.aggressiveness.into());
        Self {
            vad,
            frame_len: settings.frame_len(),
        }
    }
}

impl FrameClassifier for WebRtcClassifier {
    fn is_speech(&mut self, frame: &[i16]) -> Result<bool> {
        if frame.len() != self.frame_len {
            return Err(VadError::InvalidFrameLength {
                expected: self.frame_len,
                actual: frame.len(),
            });
        }
        self.vad
            .is_voice_segment(frame)
            .map_err(|()| VadError::Classifier("frame rejected by webrtc vad".to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebRtcClassifierFactory;

impl ClassifierFactory for WebRtcClassifierFactory {
    fn create(&self, settings: &VadSettings) -> Result<Box<dyn FrameClassifier>> {
        Ok(Box::new(WebRtcClassifier::new(settings)))
    }
}
