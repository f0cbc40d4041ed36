//! Protocol types.

use crate::games::DiceId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique session identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player identifier.
///
/// The computer is always the host: it commits to every random number,
/// and the user contributes the second half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    Computer,
    User,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Computer => write!(f, "computer"),
            Player::User => write!(f, "user"),
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    UserWins,
    ComputerWins,
    Tie,
}

impl GameResult {
    /// Compare the two roll results; the strictly greater face wins
    pub fn from_rolls(user: u32, computer: u32) -> Self {
        match user.cmp(&computer) {
            std::cmp::Ordering::Greater => GameResult::UserWins,
            std::cmp::Ordering::Less => GameResult::ComputerWins,
            std::cmp::Ordering::Equal => GameResult::Tie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::UserWins => "You win",
            GameResult::ComputerWins => "I win",
            GameResult::Tie => "It's a tie",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of combining a committed number with the counterpart's contribution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub committed: u64,
    pub contribution: u64,
    pub modulus: u64,
    pub value: u64,
}

impl RollOutcome {
    /// `value = (committed + contribution) mod modulus`
    pub fn combine(committed: u64, contribution: u64, modulus: u64) -> Self {
        Self {
            committed,
            contribution,
            modulus,
            value: (committed + contribution) % modulus,
        }
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {} = {} (mod {})",
            self.committed, self.contribution, self.value, self.modulus
        )
    }
}

/// The dice each side ended up with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picks {
    pub computer: DiceId,
    pub user: DiceId,
}

/// Session phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    DecidingFirstPlayer,
    SelectingDice,
    RollingHost,
    RollingGuest,
    Finished,
}
