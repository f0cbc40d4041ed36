//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while building the set of dice before a session starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("Dice '{input}' has {found} faces, expected exactly 6")]
    WrongFaceCount { input: String, found: usize },

    #[error("Dice '{input}' has an invalid face '{face}': faces must be non-negative integers")]
    InvalidFace { input: String, face: String },

    #[error("At least 3 dice are required, got {found}")]
    TooFewDice { found: usize },
}

/// Errors from the fair random exchange
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Malformed secret key: expected 32 bytes of hex")]
    MalformedKey,

    #[error("Malformed commitment hash: expected 32 bytes of hex")]
    MalformedHash,

    #[error("Commitment does not match the disclosed number {number}")]
    CommitmentMismatch { number: u64 },
}

/// Errors that end a game session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
