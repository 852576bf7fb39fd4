use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use voxgate_stt::{segments_text, SttEngine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionOutcome {
    Text(String),
    /// The engine failed or heard nothing.
    Absent,
    TimedOut,
}

pub struct TranscriptionService;

impl TranscriptionService {
    /// Transcribe a file, folding engine errors and empty output into `None`.
    pub fn transcribe_text(engine: &dyn SttEngine, path: &Path, language: &str) -> Option<String> {
        tracing::info!(path = %path.display(), model = engine.model_name(), "Transcribing file");

        let segments = match engine.transcribe_file(path, language) {
            Ok(segments) => segments,
            Err(e) => {
                tracing::warn!(error = %e, "Transcription failed");
                return None;
            }
        };

        let text = segments_text(&segments);
        tracing::debug!(
            segment_count = segments.len(),
            text_preview = %text.chars().take(50).collect::<String>(),
            "transcription_result"
        );

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Run the engine on a worker thread and give up after `timeout`.
    ///
    /// A timed-out worker is left to finish in the background; its result
    /// is discarded. A panicking engine counts as no transcript.
    pub fn transcribe_with_timeout(
        engine: Arc<dyn SttEngine>,
        path: &Path,
        language: &str,
        timeout: Duration,
    ) -> TranscriptionOutcome {
        let (tx, rx) = crossbeam_channel::bounded::<Option<String>>(1);
        let path: PathBuf = path.to_path_buf();
        let language = language.to_string();

        let spawned = std::thread::Builder::new()
            .name("voxgate-stt".to_string())
            .spawn(move || {
                let text = Self::transcribe_text(engine.as_ref(), &path, &language);
                // The receiver is gone after a timeout.
                let _ = tx.send(text);
            });

        if let Err(e) = spawned {
            tracing::warn!(error = %e, "Failed to spawn transcription worker");
            return TranscriptionOutcome::Absent;
        }

        match rx.recv_timeout(timeout) {
            Ok(Some(text)) => TranscriptionOutcome::Text(text),
            Ok(None) => TranscriptionOutcome::Absent,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Transcription timed out");
                TranscriptionOutcome::TimedOut
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("Transcription worker exited without a result");
                TranscriptionOutcome::Absent
            }
        }
    }
}
