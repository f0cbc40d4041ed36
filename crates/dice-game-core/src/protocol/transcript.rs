//! Record of every commitment disclosed during a session.

use super::types::{RollOutcome, SessionId};
use crate::crypto::{self, CommitmentHash, SecretKey};
use crate::error::CryptoError;
use serde::{Deserialize, Serialize};

/// Which decision a disclosure settled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureStep {
    FirstPlayer,
    ComputerRoll,
    UserRoll,
}

/// One completed commit-reveal exchange
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclosure {
    pub step: DisclosureStep,
    pub hash: CommitmentHash,
    pub key: SecretKey,
    pub outcome: RollOutcome,
}

impl Disclosure {
    /// The commitment matches the key and number, and the sum is right
    pub fn verify(&self) -> Result<bool, CryptoError> {
        let recomputed = RollOutcome::combine(
            self.outcome.committed,
            self.outcome.contribution,
            self.outcome.modulus,
        );
        Ok(recomputed == self.outcome
            && crypto::verify(&self.key, self.outcome.committed, &self.hash)?)
    }
}

/// All disclosures of one session, in the order they happened
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub session_id: SessionId,
    pub disclosures: Vec<Disclosure>,
}

impl Transcript {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            disclosures: Vec::new(),
        }
    }

    pub fn push(&mut self, disclosure: Disclosure) {
        self.disclosures.push(disclosure);
    }

    /// Re-check every disclosure
    pub fn verify_all(&self) -> Result<bool, CryptoError> {
        for disclosure in &self.disclosures {
            if !disclosure.verify()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::FairRandom;

    fn disclosure(number_max: u64, contribution: u64) -> Disclosure {
        let committed = FairRandom::new().bundle(number_max).unwrap();
        Disclosure {
            step: DisclosureStep::ComputerRoll,
            hash: committed.hash,
            key: committed.key,
            outcome: RollOutcome::combine(committed.number, contribution, number_max + 1),
        }
    }

    #[test]
    fn test_transcript_verifies() {
        let mut transcript = Transcript::new(SessionId::new());
        transcript.push(disclosure(1, 1));
        transcript.push(disclosure(5, 4));

        assert!(transcript.verify_all().unwrap());
    }

    #[test]
    fn test_tampered_number_fails() {
        let mut d = disclosure(5, 0);
        d.outcome = RollOutcome::combine((d.outcome.committed + 1) % 6, 0, 6);

        let mut transcript = Transcript::new(SessionId::new());
        transcript.push(d);
        assert!(!transcript.verify_all().unwrap());
    }

    #[test]
    fn test_tampered_sum_fails() {
        let mut d = disclosure(5, 2);
        d.outcome.value = (d.outcome.value + 1) % 6;
        assert!(!d.verify().unwrap());
    }

    #[test]
    fn test_transcript_json_roundtrip() {
        let mut transcript = Transcript::new(SessionId::new());
        transcript.push(disclosure(5, 3));

        let json = transcript.to_json().unwrap();
        assert!(json.contains("\"computer_roll\""));

        let back: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(back, transcript);
        assert!(back.verify_all().unwrap());
    }
}
