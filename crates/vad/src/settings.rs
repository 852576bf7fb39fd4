use serde::{Deserialize, Serialize};

use crate::VadError;

/// Sample rates the frame classifier accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum VadSampleRate {
    Hz8000,
    #[default]
    Hz16000,
    Hz32000,
    Hz48000,
}

impl VadSampleRate {
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz8000 => 8000,
            Self::Hz16000 => 16000,
            Self::Hz32000 => 32000,
            Self::Hz48000 => 48000,
        }
    }
}

impl TryFrom<u32> for VadSampleRate {
    type Error = VadError;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        match hz {
            8000 => Ok(Self::Hz8000),
            16000 => Ok(Self::Hz16000),
            32000 => Ok(Self::Hz32000),
            48000 => Ok(Self::Hz48000),
            other => Err(VadError::UnsupportedSampleRate(other)),
        }
    }
}

impl From<VadSampleRate> for u32 {
    fn from(rate: VadSampleRate) -> Self {
        rate.hz()
    }
}

/// Frame duration for classification.
///
/// At 16 kHz: 10 ms = 160 samples, 20 ms = 320, 30 ms = 480.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FrameDuration {
    Ms10,
    Ms20,
    #[default]
    Ms30,
}

impl FrameDuration {
    pub const fn millis(self) -> u32 {
        match self {
            Self::Ms10 => 10,
            Self::Ms20 => 20,
            Self::Ms30 => 30,
        }
    }
}

impl TryFrom<u32> for FrameDuration {
    type Error = VadError;

    fn try_from(ms: u32) -> Result<Self, Self::Error> {
        match ms {
            10 => Ok(Self::Ms10),
            20 => Ok(Self::Ms20),
            30 => Ok(Self::Ms30),
            other => Err(VadError::UnsupportedFrameDuration(other)),
        }
    }
}

impl From<FrameDuration> for u32 {
    fn from(duration: FrameDuration) -> Self {
        duration.millis()
    }
}

/// Classifier aggressiveness, 0 (least) to 3 (most aggressive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Aggressiveness {
    Quality,
    LowBitrate,
    #[default]
    Aggressive,
    VeryAggressive,
}

impl TryFrom<u8> for Aggressiveness {
    type Error = VadError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Quality),
            1 => Ok(Self::LowBitrate),
            2 => Ok(Self::Aggressive),
            3 => Ok(Self::VeryAggressive),
            other => Err(VadError::UnsupportedAggressiveness(other)),
        }
    }
}

impl From<Aggressiveness> for u8 {
    fn from(level: Aggressiveness) -> Self {
        match level {
            Aggressiveness::Quality => 0,
            Aggressiveness::LowBitrate => 1,
            Aggressiveness::Aggressive => 2,
            Aggressiveness::VeryAggressive => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VadSettings {
    pub sample_rate: VadSampleRate,
    #[serde(rename = "frame_duration_ms")]
    pub frame_duration: FrameDuration,
    pub aggressiveness: Aggressiveness,
}

impl VadSettings {
    /// Samples per frame.
    pub fn frame_len(&self) -> usize {
        (self.sample_rate.hz() * self.frame_duration.millis() / 1000) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_len_at_16k() {
        let mut settings = VadSettings::default();
        assert_eq!(settings.frame_len(), 480);
        settings.frame_duration = FrameDuration::Ms20;
        assert_eq!(settings.frame_len(), 320);
        settings.frame_duration = FrameDuration::Ms10;
        assert_eq!(settings.frame_len(), 160);
    }

    #[test]
    fn test_frame_len_at_48k() {
        let settings = VadSettings {
            sample_rate: VadSampleRate::Hz48000,
            ..Default::default()
        };
        assert_eq!(settings.frame_len(), 1440);
    }

    #[test]
    fn test_unsupported_values_rejected() {
        assert!(matches!(
            VadSampleRate::try_from(44100),
            Err(VadError::UnsupportedSampleRate(44100))
        ));
        assert!(matches!(
            FrameDuration::try_from(25),
            Err(VadError::UnsupportedFrameDuration(25))
        ));
        assert!(Aggressiveness::try_from(4).is_err());
    }

    #[test]
    fn test_default_sample_rate_is_16k() {
        assert_eq!(VadSampleRate::default(), VadSampleRate::Hz16000);
        assert_eq!(u32::from(VadSampleRate::default()), 16000);
    }

    #[test]
    fn test_default_aggressiveness_is_moderate() {
        assert_eq!(u8::from(Aggressiveness::default()), 2);
    }
}
