//! Dice definitions and win-probability logic.

mod dice;
mod table;
mod win;

pub use dice::{Dice, DiceId, DiceSet, FACE_COUNT, MIN_DICE};
pub use table::probability_table;
pub use win::{win_chance, win_matrix, WinChance};
