use serde::{Deserialize, Serialize};

use crate::MAX_CHALLENGE_DIGIT;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("challenge digit {value} at position {index} is outside 0..={max}", max = MAX_CHALLENGE_DIGIT)]
pub struct ChallengeError {
    pub index: usize,
    pub value: u32,
}

/// Digits displayed to the user, validated before any verification starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Challenge(Vec<u32>);

impl Challenge {
    pub fn new(digits: Vec<u32>) -> Result<Self, ChallengeError> {
        if let Some((index, &value)) = digits
            .iter()
            .enumerate()
            .find(|(_, d)| **d > MAX_CHALLENGE_DIGIT)
        {
            return Err(ChallengeError { index, value });
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> &[u32] {
        &self.0
    }

    pub fn matches(&self, recognized: &[u32]) -> bool {
        self.0 == recognized
    }
}

impl TryFrom<Vec<u32>> for Challenge {
    type Error = ChallengeError;

    fn try_from(digits: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<Challenge> for Vec<u32> {
    fn from(challenge: Challenge) -> Self {
        challenge.0
    }
}
