//! Coarse loudness classification of a whole recording.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityVerdict {
    Quiet,
    Loud,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Log energy/variance ratio above which the recording counts as quiet.
    pub quiet_threshold: f64,
    /// Peak absolute amplitude at or above which the recording counts as clipped.
    pub overload_threshold: f32,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            quiet_threshold: 0.1,
            overload_threshold: 0.99,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    pub verdict: QualityVerdict,
    /// `None` when the waveform has no variance.
    pub snr: Option<f64>,
    pub peak: f32,
}

/// Classify a waveform as quiet, loud or normal.
///
/// `snr = 1000 * log10(mean(y^2) / var(y))`. The quiet check runs before the
/// overload check, so a clipped recording with a large ratio is still quiet.
pub fn estimate_quality(samples: &[f32], thresholds: &QualityThresholds) -> QualityReport {
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));

    let snr = signal_to_variance_ratio(samples);
    let quiet = match snr {
        Some(snr) => snr > thresholds.quiet_threshold,
        None => true,
    };

    let verdict = if quiet {
        QualityVerdict::Quiet
    } else if peak >= thresholds.overload_threshold {
        QualityVerdict::Loud
    } else {
        QualityVerdict::Normal
    };

    tracing::debug!(?snr, peak, ?verdict, "Estimated signal quality");

    QualityReport { verdict, snr, peak }
}

fn signal_to_variance_ratio(samples: &[f32]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    let signal_energy = samples.iter().map(|&s| (s as f64).powi(2)).sum::<f64>() / n;
    let noise_energy = samples
        .iter()
        .map(|&s| (s as f64 - mean).powi(2))
        .sum::<f64>()
        / n;

    if noise_energy <= 0.0 {
        return None;
    }
    let snr = 1000.0 * (signal_energy / noise_energy).log10();
    snr.is_finite().then_some(snr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(amplitude: f64, period: usize, periods: usize) -> Vec<f32> {
        (0..period * periods)
            .map(|i| (amplitude * (2.0 * PI * i as f64 / period as f64).sin()) as f32)
            .collect()
    }

    #[test]
    fn test_zero_variance_is_quiet() {
        let thresholds = QualityThresholds::default();
        for samples in [vec![0.0f32; 16000], vec![0.3f32; 16000], Vec::new()] {
            let report = estimate_quality(&samples, &thresholds);
            assert_eq!(report.verdict, QualityVerdict::Quiet);
            assert_eq!(report.snr, None);
        }
    }

    #[test]
    fn test_dc_offset_is_quiet() {
        let samples: Vec<f32> = sine(0.001, 160, 100).iter().map(|s| s + 0.01).collect();
        let report = estimate_quality(&samples, &QualityThresholds::default());
        assert_eq!(report.verdict, QualityVerdict::Quiet);
        assert!(report.snr.unwrap() > 0.1);
    }

    #[test]
    fn test_centered_tone_is_normal() {
        let report = estimate_quality(&sine(0.5, 160, 100), &QualityThresholds::default());
        assert_eq!(report.verdict, QualityVerdict::Normal);
        assert!(report.snr.unwrap() <= 0.1);
        assert!((report.peak - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_clipped_tone_is_loud() {
        let report = estimate_quality(&sine(1.0, 160, 100), &QualityThresholds::default());
        assert_eq!(report.verdict, QualityVerdict::Loud);
    }

    #[test]
    fn test_quiet_takes_priority_over_overload() {
        // Clipped and offset: the ratio check fires first.
        let samples: Vec<f32> = sine(0.5, 160, 100).iter().map(|s| s + 0.5).collect();
        let report = estimate_quality(&samples, &QualityThresholds::default());
        assert!(report.peak >= 0.99);
        assert_eq!(report.verdict, QualityVerdict::Quiet);
    }

    #[test]
    fn test_custom_overload_threshold() {
        let thresholds = QualityThresholds {
            overload_threshold: 0.4,
            ..Default::default()
        };
        let report = estimate_quality(&sine(0.5, 160, 100), &thresholds);
        assert_eq!(report.verdict, QualityVerdict::Loud);
    }
}
