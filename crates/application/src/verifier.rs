//! The verification pipeline.
//!
//! Gates run in a fixed order and the first failing gate decides the
//! verdict: canonical audio, signal quality, transcription, language,
//! numerals, background noise, challenge match.

use std::path::Path;
use std::sync::Arc;

use voxgate_audio::{
    ensure_canonical, estimate_quality, AudioError, QualityVerdict, SymphoniaTranscoder,
    Transcoder, Waveform, SAMPLE_RATE,
};
use voxgate_stt::SttEngine;
use voxgate_transcript::{
    clean_text, DigitNormalizer, LanguageIdentifier, ScriptLanguageIdentifier,
};
use voxgate_vad::{ClassifierFactory, NoiseFloor, Segmenter, VadError, WebRtcClassifierFactory};

use crate::{
    Challenge, ConfigError, RejectReason, TranscriptionOutcome, TranscriptionService, Verdict,
    VerificationReport, VerifierConfig,
};

/// External services the pipeline depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub transcoder: Arc<dyn Transcoder>,
    pub engine: Arc<dyn SttEngine>,
    pub language: Arc<dyn LanguageIdentifier>,
    pub classifier: Arc<dyn ClassifierFactory>,
}

impl Collaborators {
    /// Symphonia transcoding, script-based language identification and the
    /// WebRTC frame classifier around the given engine.
    pub fn with_defaults(engine: Arc<dyn SttEngine>, config: &VerifierConfig) -> Self {
        Self {
            transcoder: Arc::new(SymphoniaTranscoder::default()),
            engine,
            language: Arc::new(ScriptLanguageIdentifier::new(config.language.clone())),
            classifier: Arc::new(WebRtcClassifierFactory),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum NoiseGateError {
    #[error("audio: {0}")]
    Audio(#[from] AudioError),
    #[error("vad: {0}")]
    Vad(#[from] VadError),
}

/// Stateless between calls; one instance can serve concurrent requests.
pub struct Verifier {
    config: VerifierConfig,
    normalizer: DigitNormalizer,
    collaborators: Collaborators,
}

impl Verifier {
    pub fn new(config: VerifierConfig, collaborators: Collaborators) -> Result<Self, ConfigError> {
        config.validate()?;
        let normalizer = DigitNormalizer::new(config.number_words()?);
        Ok(Self {
            config,
            normalizer,
            collaborators,
        })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Rejection text for `verdict` in the configured locale, naming the
    /// configured target language where relevant.
    pub fn message(&self, verdict: &Verdict) -> Option<String> {
        verdict.message(self.config.locale, &self.config.language)
    }

    pub fn verify(&self, audio_path: &Path, expected: Option<&Challenge>) -> Verdict {
        self.verify_report(audio_path, expected).verdict
    }

    pub fn verify_report(
        &self,
        audio_path: &Path,
        expected: Option<&Challenge>,
    ) -> VerificationReport {
        let mut report = VerificationReport::new();
        report.verdict = self.run(audio_path, expected, &mut report);
        report.message = self.message(&report.verdict);

        match report.verdict {
            Verdict::Pass => {
                tracing::info!(path = %audio_path.display(), "Verification passed");
            }
            Verdict::Fail(reason) => {
                tracing::info!(
                    path = %audio_path.display(),
                    reason = reason.code(),
                    "Verification rejected"
                );
            }
        }
        report
    }

    fn run(
        &self,
        audio_path: &Path,
        expected: Option<&Challenge>,
        report: &mut VerificationReport,
    ) -> Verdict {
        let canonical = ensure_canonical(self.collaborators.transcoder.as_ref(), audio_path);
        report.canonical_path = Some(canonical.clone());

        let waveform = match Waveform::load(&canonical, SAMPLE_RATE) {
            Ok(waveform) => waveform,
            Err(e) => {
                tracing::warn!(path = %canonical.display(), error = %e, "Unreadable recording");
                return Verdict::Fail(RejectReason::Unprocessable);
            }
        };

        let quality = estimate_quality(waveform.samples(), &self.config.quality);
        report.quality = Some(quality);
        match quality.verdict {
            QualityVerdict::Quiet => return Verdict::Fail(RejectReason::TooQuiet),
            QualityVerdict::Loud => return Verdict::Fail(RejectReason::TooLoud),
            QualityVerdict::Normal => {}
        }

        let transcript = match TranscriptionService::transcribe_with_timeout(
            Arc::clone(&self.collaborators.engine),
            &canonical,
            &self.config.language,
            self.config.transcription_timeout(),
        ) {
            TranscriptionOutcome::Text(text) => clean_text(&text),
            TranscriptionOutcome::Absent => String::new(),
            TranscriptionOutcome::TimedOut => {
                return Verdict::Fail(RejectReason::ProcessingTimedOut)
            }
        };
        report.transcript = Some(transcript.clone());

        let language = self.collaborators.language.identify(&transcript);
        report.language = language.clone();
        if language.as_deref() != Some(self.config.language.as_str()) {
            return Verdict::Fail(RejectReason::WrongLanguage);
        }

        // The numeral gate and normalization share one token predicate.
        let Some(recognized) = self.normalizer.normalize(&transcript) else {
            return Verdict::Fail(RejectReason::NotDigits);
        };
        report.recognized = Some(recognized.clone());

        match self.measure_noise(&canonical, &waveform) {
            Ok(floor) => {
                report.noise = Some(floor);
                if floor.exceeds(self.config.noise.silence_threshold) {
                    return Verdict::Fail(RejectReason::BackgroundNoise);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Noise check failed, rejecting");
                return Verdict::Fail(RejectReason::BackgroundNoise);
            }
        }

        if let Some(challenge) = expected {
            if !challenge.matches(&recognized) {
                tracing::debug!(
                    expected = ?challenge.digits(),
                    recognized = ?recognized,
                    "Digit sequence mismatch"
                );
                return Verdict::Fail(RejectReason::DigitsMismatch);
            }
        }

        Verdict::Pass
    }

    fn measure_noise(
        &self,
        canonical: &Path,
        waveform: &Waveform,
    ) -> Result<NoiseFloor, NoiseGateError> {
        let settings = self.config.vad;
        let rate = settings.sample_rate.hz();
        let waveform = if waveform.sample_rate() == rate {
            waveform.clone()
        } else {
            Waveform::load(canonical, rate)?
        };

        let mut classifier = self.collaborators.classifier.create(&settings)?;
        let segments =
            Segmenter::new(&settings).segment(&waveform.to_pcm16(), classifier.as_mut())?;
        Ok(NoiseFloor::measure(&segments))
    }
}
