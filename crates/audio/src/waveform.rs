use std::path::Path;
use std::sync::Arc;

use hound::SampleFormat;

use crate::resample::resample;
use crate::Result;

/// Immutable mono recording with samples normalized to [-1.0, 1.0].
///
/// Cloning is cheap: the sample buffer is shared.
#[derive(Debug, Clone)]
pub struct Waveform {
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl Waveform {
    /// Wraps raw mono samples, clamping anything outside [-1.0, 1.0].
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        let samples: Vec<f32> = samples
            .into_iter()
            .map(|s| if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 })
            .collect();
        Self {
            samples: samples.into(),
            sample_rate,
        }
    }

    /// Read a WAV file, mix it down to mono and resample to `sample_rate`.
    pub fn load(path: &Path, sample_rate: u32) -> Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<_, _>>()?,
            SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };

        let mono = to_mono(&interleaved, channels);
        let samples = resample(&mono, spec.sample_rate, sample_rate)?;

        tracing::debug!(
            path = %path.display(),
            source_rate = spec.sample_rate,
            channels,
            samples = samples.len(),
            "Loaded waveform"
        );

        Ok(Self::new(samples, sample_rate))
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// Fixed-point 16-bit view of the samples (scaled by 32768, saturating).
    pub fn to_pcm16(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|s| (s * 32768.0).clamp(i16::MIN as f32, i16::MAX as f32) as i16)
            .collect()
    }
}

pub(crate) fn to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let inv_channels = 1.0 / channels as f32;
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * inv_channels)
        .collect()
}
