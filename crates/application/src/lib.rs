mod challenge;
mod config;
mod constants;
mod transcription;
mod verdict;
mod verifier;

pub use challenge::{Challenge, ChallengeError};
pub use config::{ConfigError, NoiseSettings, VerifierConfig};
pub use constants::*;
pub use transcription::{TranscriptionOutcome, TranscriptionService};
pub use verdict::{Locale, RejectReason, Verdict, VerificationReport};
pub use verifier::{Collaborators, Verifier};
