use rubato::{FftFixedIn, Resampler};

use crate::{AudioError, Result};

const CHUNK_SIZE: usize = 1024;

/// Resample a complete mono buffer.
///
/// Uses the rubato FFT resampler and compensates its output delay, so the
/// result is time-aligned with the input and has `len * to / from` samples.
/// Falls back to linear interpolation when rubato rejects the rate pair.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }
    if from_rate == 0 || to_rate == 0 {
        return Err(AudioError::Resample(format!(
            "invalid rate pair {from_rate} -> {to_rate}"
        )));
    }

    let mut resampler =
        match FftFixedIn::<f32>::new(from_rate as usize, to_rate as usize, CHUNK_SIZE, 2, 1) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(
                    from_rate,
                    to_rate,
                    error = %e,
                    "FFT resampler unavailable, using linear interpolation"
                );
                return Ok(resample_linear(samples, from_rate, to_rate));
            }
        };

    let expected = (samples.len() as f64 * to_rate as f64 / from_rate as f64).round() as usize;
    let delay = resampler.output_delay();
    let mut output = Vec::with_capacity(expected + delay + CHUNK_SIZE);

    let mut chunks = samples.chunks_exact(CHUNK_SIZE);
    for chunk in &mut chunks {
        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.extend_from_slice(&resampled[0]);
    }

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let resampled = resampler
            .process_partial(Some(&[remainder][..]), None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.extend_from_slice(&resampled[0]);
    }

    // Drain the delay line.
    let mut flushes = 0;
    while output.len() < expected + delay && flushes < 8 {
        let resampled = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        if resampled[0].is_empty() {
            break;
        }
        output.extend_from_slice(&resampled[0]);
        flushes += 1;
    }

    let mut aligned: Vec<f32> = output.into_iter().skip(delay).take(expected).collect();
    aligned.resize(expected, 0.0);
    Ok(aligned)
}

/// Linear interpolation resampling.
fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    let ratio = to_rate as f64 / from_rate as f64;
    let new_len = (samples.len() as f64 * ratio) as usize;
    let mut output = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src_idx = i as f64 / ratio;
        let idx = src_idx.floor() as usize;
        let frac = src_idx.fract() as f32;
        let sample = if idx + 1 < samples.len() {
            samples[idx] * (1.0 - frac) + samples[idx + 1] * frac
        } else if idx < samples.len() {
            samples[idx]
        } else {
            0.0
        };
        output.push(sample);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_is_identity() {
        let input = vec![0.1, -0.2, 0.3];
        assert_eq!(resample(&input, 16000, 16000).unwrap(), input);
    }

    #[test]
    fn test_downsample_length() {
        let input = vec![0.0f32; 48000];
        let output = resample(&input, 48000, 16000).unwrap();
        assert_eq!(output.len(), 16000);
    }

    #[test]
    fn test_upsample_preserves_dc_level() {
        let input = vec![0.5f32; 22050];
        let output = resample(&input, 22050, 16000).unwrap();
        assert_eq!(output.len(), 16000);
        // Ignore filter ramp at the edges.
        let middle = &output[2000..14000];
        assert!(middle.iter().all(|s| (s - 0.5).abs() < 0.01));
    }

    #[test]
    fn test_linear_interpolation_midpoints() {
        let output = resample_linear(&[0.0, 1.0], 1, 2);
        assert_eq!(output.len(), 4);
        assert!((output[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate_is_error() {
        assert!(resample(&[0.0], 0, 16000).is_err());
    }
}
