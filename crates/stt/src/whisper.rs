//! Local whisper.cpp engine.

use std::path::Path;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::{Segment, SttEngine, SttError};

/// Whisper model loaded once and shared by every transcription.
pub struct WhisperEngine {
    ctx: WhisperContext,
    model_name: String,
    threads: i32,
}

impl WhisperEngine {
    /// Load a GGML model file (e.g. `ggml-small.bin`).
    pub fn load(model_path: &Path) -> crate::Result<Self> {
        let path = model_path
            .to_str()
            .ok_or_else(|| SttError::ModelNotLoaded(model_path.display().to_string()))?;
        let ctx = WhisperContext::new_with_params(path, WhisperContextParameters::default())
            .map_err(|e| SttError::ModelNotLoaded(format!("{}: {e}", model_path.display())))?;

        let model_name = model_path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("whisper")
            .to_string();
        let threads = std::thread::available_parallelism()
            .map(|n| n.get().min(8) as i32)
            .unwrap_or(4);

        tracing::info!(model = %model_name, threads, "Loaded whisper model");

        Ok(Self {
            ctx,
            model_name,
            threads,
        })
    }
}

impl SttEngine for WhisperEngine {
    fn transcribe(&self, audio: &[f32], language: &str) -> crate::Result<Vec<Segment>> {
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| SttError::TranscriptionFailed(e.to_string()))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(language));
        params.set_n_threads(self.threads);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_special(false);
        params.set_print_timestamps(false);

        state
            .full(params, audio)
            .map_err(|e| SttError::TranscriptionFailed(e.to_string()))?;

        let count = state
            .full_n_segments()
            .map_err(|e| SttError::TranscriptionFailed(e.to_string()))?;

        let mut segments = Vec::with_capacity(count.max(0) as usize);
        for i in 0..count {
            let text = state
                .full_get_segment_text(i)
                .map_err(|e| SttError::TranscriptionFailed(e.to_string()))?;
            // Timestamps are in centiseconds.
            let t0 = state.full_get_segment_t0(i).unwrap_or(0).max(0) as u64;
            let t1 = state.full_get_segment_t1(i).unwrap_or(0).max(0) as u64;
            segments.push(Segment {
                text,
                start_ms: t0 * 10,
                end_ms: t1 * 10,
            });
        }

        tracing::debug!(segments = segments.len(), "Whisper transcription finished");
        Ok(segments)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
