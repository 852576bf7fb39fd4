use crate::Segments;

/// Population variance of one frame in the 16-bit domain.
pub fn frame_variance(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    samples
        .iter()
        .map(|&s| (s as f64 - mean).powi(2))
        .sum::<f64>()
        / n
}

/// Background noise estimate taken over the non-speech frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseFloor {
    /// Mean per-frame variance; 0 when there are no non-speech frames.
    pub mean_variance: f64,
    pub non_active_frames: usize,
}

impl NoiseFloor {
    pub fn measure(segments: &Segments) -> Self {
        let frames = &segments.non_active;
        let mean_variance = if frames.is_empty() {
            0.0
        } else {
            frames
                .iter()
                .map(|f| frame_variance(&f.samples))
                .sum::<f64>()
                / frames.len() as f64
        };

        tracing::debug!(
            mean_variance,
            non_active_frames = frames.len(),
            "Measured noise floor"
        );

        Self {
            mean_variance,
            non_active_frames: frames.len(),
        }
    }

    pub fn exceeds(&self, threshold: f64) -> bool {
        self.mean_variance > threshold
    }
}
