//! Conversion of arbitrary recordings into the canonical 16 kHz mono WAV.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::resample::resample;
use crate::waveform::to_mono;
use crate::{AudioError, Result, SAMPLE_RATE};

/// Converts a recording into a WAV file the pipeline can decode.
pub trait Transcoder: Send + Sync {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Path of the canonical WAV for `input`: same location, `wav` extension.
pub fn canonical_path(input: &Path) -> PathBuf {
    input.with_extension("wav")
}

/// Make sure the canonical WAV for `input` exists and return its path.
///
/// An existing canonical file is reused as is. Transcoding failures are
/// logged and swallowed; later stages fail on the unreadable file instead.
pub fn ensure_canonical(transcoder: &dyn Transcoder, input: &Path) -> PathBuf {
    let output = canonical_path(input);
    if output.exists() {
        tracing::debug!(path = %output.display(), "Canonical audio already present");
        return output;
    }

    match transcoder.transcode(input, &output) {
        Ok(()) => {
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                "Converted recording to canonical WAV"
            );
        }
        Err(e) => {
            tracing::error!(input = %input.display(), error = %e, "Transcoding failed");
        }
    }
    output
}

/// Decodes any container symphonia understands and writes 16-bit mono WAV.
#[derive(Debug, Clone)]
pub struct SymphoniaTranscoder {
    sample_rate: u32,
}

impl Default for SymphoniaTranscoder {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
        }
    }
}

impl SymphoniaTranscoder {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl Transcoder for SymphoniaTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        let (samples, source_rate) = decode_mono(input)?;
        let samples = resample(&samples, source_rate, self.sample_rate)?;
        write_wav_atomic(output, &samples, self.sample_rate)
    }
}

fn decode_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    let file = std::fs::File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AudioError::Decode(e.to_string()))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AudioError::NoAudioTrack(path.display().to_string()))?;
    let track_id = track.id;
    let source_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AudioError::Decode("unknown sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::Decode(e.to_string()))?;

    let mut mono = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::debug!(error = e, "Skipping corrupt packet");
                continue;
            }
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        };

        let spec = *decoded.spec();
        let channels = spec.channels.count();
        let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        mono.extend(to_mono(buffer.samples(), channels));
    }

    tracing::debug!(
        path = %path.display(),
        source_rate,
        samples = mono.len(),
        "Decoded recording"
    );

    Ok((mono, source_rate))
}

/// Write into a temporary file next to `output`, then rename it into place.
///
/// Concurrent conversions of the same input each write their own temporary
/// file; the last rename wins with identical content.
fn write_wav_atomic(output: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".voxgate-")
        .suffix(".wav")
        .tempfile_in(dir)?;

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    {
        let mut writer = WavWriter::new(BufWriter::new(tmp.as_file_mut()), spec)?;
        for &sample in samples {
            let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(value)?;
        }
        writer.finalize()?;
    }

    tmp.persist(output).map_err(|e| AudioError::Io(e.error))?;
    Ok(())
}
