//! Win probability between two dice.

use super::dice::{Dice, DiceSet, FACE_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exact probability that one die beats another, as `wins / total`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinChance {
    pub wins: u32,
    pub total: u32,
}

impl WinChance {
    pub fn as_f64(&self) -> f64 {
        f64::from(self.wins) / f64::from(self.total)
    }
}

impl fmt::Display for WinChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.as_f64())
    }
}

/// Probability that a roll of `a` shows a strictly higher face than a roll of `b`.
///
/// Enumerates all 36 face pairs; ties count for neither side.
pub fn win_chance(a: &Dice, b: &Dice) -> WinChance {
    let wins = a
        .faces()
        .iter()
        .flat_map(|fa| b.faces().iter().map(move |fb| fa > fb))
        .filter(|&beats| beats)
        .count();

    WinChance {
        wins: wins as u32,
        total: (FACE_COUNT * FACE_COUNT) as u32,
    }
}

/// `matrix[row][col]` is the chance that die `row` beats die `col`
pub fn win_matrix(set: &DiceSet) -> Vec<Vec<WinChance>> {
    set.iter()
        .map(|(_, row)| set.iter().map(|(_, col)| win_chance(row, col)).collect())
        .collect()
}
