//! Cryptographic primitives for the fair random exchange.
//!
//! This module provides:
//! - SecretKey and CommitmentHash for the commit-reveal scheme
//! - EntropySource with the OS-backed and scripted implementations
//! - FairRandom: key generation, unbiased draws, commit and verify

mod entropy;
mod fair_random;
mod key;

pub use entropy::{EntropySource, OsEntropy, ScriptedEntropy};
pub use fair_random::{commit, verify, Committed, FairRandom};
pub use key::{CommitmentHash, SecretKey, KEY_LEN};
