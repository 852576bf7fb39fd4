/// Language the challenge digits must be spoken in.
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Mean non-speech frame variance (16-bit domain) above which the
/// recording is rejected as noisy.
pub const DEFAULT_SILENCE_THRESHOLD: f64 = 5000.0;

/// Upper bound on a single transcription call.
pub const DEFAULT_TRANSCRIPTION_TIMEOUT_MS: u64 = 30_000;

/// Largest value a challenge digit may take.
pub const MAX_CHALLENGE_DIGIT: u32 = 10;
