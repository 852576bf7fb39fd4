use crate::{FrameClassifier, Result, VadSettings};

/// A complete, classified frame of 16-bit PCM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Offset of the first sample in the source waveform.
    pub start: usize,
    pub samples: Vec<i16>,
}

/// Frames split by classification, each collection in temporal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments {
    pub active: Vec<Frame>,
    pub non_active: Vec<Frame>,
}

impl Segments {
    pub fn frame_count(&self) -> usize {
        self.active.len() + self.non_active.len()
    }
}

/// Splits PCM into non-overlapping fixed-length frames and routes each one
/// into `active` or `non_active`.
#[derive(Debug, Clone, Copy)]
pub struct Segmenter {
    frame_len: usize,
}

impl Segmenter {
    pub fn new(settings: &VadSettings) -> Self {
        Self {
            frame_len: settings.frame_len(),
        }
    }

    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Classify every complete frame. A trailing partial frame is dropped
    /// without being classified.
    pub fn segment(
        &self,
        pcm: &[i16],
        classifier: &mut dyn FrameClassifier,
    ) -> Result<Segments> {
        let mut segments = Segments::default();
        if self.frame_len == 0 {
            return Ok(segments);
        }

        let frames = pcm.chunks_exact(self.frame_len);
        let discarded = frames.remainder().len();

        for (index, samples) in frames.enumerate() {
            let frame = Frame {
                start: index * self.frame_len,
                samples: samples.to_vec(),
            };
            if classifier.is_speech(samples)? {
                segments.active.push(frame);
            } else {
                segments.non_active.push(frame);
            }
        }

        tracing::debug!(
            active = segments.active.len(),
            non_active = segments.non_active.len(),
            discarded_samples = discarded,
            "Segmented waveform"
        );

        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FrameDuration, VadError};

    /// Marks a frame as speech when its first sample is non-zero.
    struct FirstSampleClassifier {
        calls: usize,
    }

    impl FrameClassifier for FirstSampleClassifier {
        fn is_speech(&mut self, frame: &[i16]) -> Result<bool> {
            self.calls += 1;
            Ok(frame[0] != 0)
        }
    }

    struct FailingClassifier;

    impl FrameClassifier for FailingClassifier {
        fn is_speech(&mut self, _frame: &[i16]) -> Result<bool> {
            Err(VadError::Classifier("boom".to_string()))
        }
    }

    fn segmenter_10ms() -> Segmenter {
        Segmenter::new(&VadSettings {
            frame_duration: FrameDuration::Ms10,
            ..Default::default()
        })
    }

    #[test]
    fn test_frame_count_is_floor_of_length() {
        let segmenter = segmenter_10ms();
        for len in [0usize, 159, 160, 161, 1000, 1600] {
            let pcm = vec![1i16; len];
            let mut classifier = FirstSampleClassifier { calls: 0 };
            let segments = segmenter.segment(&pcm, &mut classifier).unwrap();
            assert_eq!(segments.frame_count(), len / 160, "len = {len}");
            assert_eq!(classifier.calls, len / 160);
        }
    }

    #[test]
    fn test_frames_do_not_overlap_and_skip_tail() {
        let segmenter = segmenter_10ms();
        let pcm: Vec<i16> = (0..1000).map(|i| (i % 7) as i16).collect();
        let mut classifier = FirstSampleClassifier { calls: 0 };
        let segments = segmenter.segment(&pcm, &mut classifier).unwrap();

        let mut starts: Vec<usize> = segments
            .active
            .iter()
            .chain(segments.non_active.iter())
            .map(|f| f.start)
            .collect();
        starts.sort_unstable();
        assert_eq!(starts, vec![0, 160, 320, 480, 640, 800]);

        let last_end = starts.last().unwrap() + 160;
        assert!(last_end <= 1000);
        assert_eq!(1000 - last_end, 1000 % 160);
    }

    #[test]
    fn test_routing_preserves_temporal_order() {
        let segmenter = segmenter_10ms();
        let mut pcm = Vec::new();
        for speech in [true, false, true, false, false] {
            pcm.extend(std::iter::repeat(if speech { 100i16 } else { 0 }).take(160));
        }
        let mut classifier = FirstSampleClassifier { calls: 0 };
        let segments = segmenter.segment(&pcm, &mut classifier).unwrap();

        let active: Vec<usize> = segments.active.iter().map(|f| f.start).collect();
        let quiet: Vec<usize> = segments.non_active.iter().map(|f| f.start).collect();
        assert_eq!(active, vec![0, 320]);
        assert_eq!(quiet, vec![160, 480, 640]);
        assert!(segments.active.iter().all(|f| f.samples.len() == 160));
    }

    #[test]
    fn test_classifier_error_propagates() {
        let segmenter = segmenter_10ms();
        let result = segmenter.segment(&[0i16; 480], &mut FailingClassifier);
        assert!(matches!(result, Err(VadError::Classifier(_))));
    }
}
