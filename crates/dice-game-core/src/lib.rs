//! Dice Game Core Library
//!
//! This crate provides the fair random exchange, the dice model with its
//! win-probability calculation, and the session state machine for a
//! two-player non-transitive dice game against the computer.

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

pub use crypto::{CommitmentHash, EntropySource, FairRandom, OsEntropy, ScriptedEntropy, SecretKey};
pub use error::{CryptoError, DiceError, SessionError};
pub use games::{Dice, DiceId, DiceSet, WinChance};
pub use protocol::{
    Console, GameResult, GameSession, Phase, Player, RollOutcome, ScriptedConsole, SessionEnd,
    SessionId, Transcript,
};
