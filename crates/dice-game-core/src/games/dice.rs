//! Six-sided dice with arbitrary non-negative faces.

use crate::error::DiceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Number of faces on every die
pub const FACE_COUNT: usize = 6;

/// Fewest dice a game can be played with
pub const MIN_DICE: usize = 3;

/// An immutable die with exactly six faces
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    faces: [u32; FACE_COUNT],
}

impl Dice {
    /// Create a die from its faces
    pub fn new(faces: [u32; FACE_COUNT]) -> Self {
        Self { faces }
    }

    /// Get the faces in order
    pub fn faces(&self) -> &[u32; FACE_COUNT] {
        &self.faces
    }

    /// Face shown for a roll result.
    ///
    /// Panics if `index >= 6`; roll results are always reduced mod 6.
    pub fn face(&self, index: usize) -> u32 {
        self.faces[index]
    }
}

impl FromStr for Dice {
    type Err = DiceError;

    /// Parse `"a,b,c,d,e,f"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != FACE_COUNT {
            return Err(DiceError::WrongFaceCount {
                input: s.to_string(),
                found: parts.len(),
            });
        }

        let mut faces = [0u32; FACE_COUNT];
        for (slot, part) in faces.iter_mut().zip(parts) {
            *slot = part.parse().map_err(|_| DiceError::InvalidFace {
                input: s.to_string(),
                face: part.to_string(),
            })?;
        }
        Ok(Self { faces })
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(u32::to_string).collect();
        write!(f, "{}", faces.join(","))
    }
}

/// Position of a die within its [`DiceSet`].
///
/// Two dice with identical faces still have distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiceId(usize);

impl DiceId {
    /// Create from an index into the set
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Get the index into the set
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for DiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ordered collection of dice offered in a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceSet {
    dice: Vec<Dice>,
}

impl DiceSet {
    /// Create a set, requiring at least three dice
    pub fn new(dice: Vec<Dice>) -> Result<Self, DiceError> {
        if dice.len() < MIN_DICE {
            return Err(DiceError::TooFewDice { found: dice.len() });
        }
        Ok(Self { dice })
    }

    /// Parse one die per argument
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self, DiceError> {
        if specs.len() < MIN_DICE {
            return Err(DiceError::TooFewDice { found: specs.len() });
        }
        let dice = specs
            .iter()
            .map(|spec| spec.as_ref().parse())
            .collect::<Result<Vec<Dice>, _>>()?;
        Self::new(dice)
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Iterate over all dice with their ids
    pub fn iter(&self) -> impl Iterator<Item = (DiceId, &Dice)> {
        self.dice.iter().enumerate().map(|(i, d)| (DiceId(i), d))
    }

    /// Ids still available once `taken` has been chosen
    pub fn remaining(&self, taken: Option<DiceId>) -> Vec<DiceId> {
        (0..self.dice.len())
            .map(DiceId)
            .filter(|id| Some(*id) != taken)
            .collect()
    }
}

impl Index<DiceId> for DiceSet {
    type Output = Dice;

    /// Panics if `id` was not produced by this set
    fn index(&self, id: DiceId) -> &Dice {
        &self.dice[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dice() {
        let dice: Dice = "2,2,4,4,9,9".parse().unwrap();
        assert_eq!(dice.faces(), &[2, 2, 4, 4, 9, 9]);
        assert_eq!(dice.to_string(), "2,2,4,4,9,9");
    }

    #[test]
    fn test_parse_tolerates_spaces() {
        let dice: Dice = "1, 2, 3, 4, 5, 6".parse().unwrap();
        assert_eq!(dice.faces(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_wrong_face_count() {
        let err = "1,2,3".parse::<Dice>().unwrap_err();
        assert_eq!(
            err,
            DiceError::WrongFaceCount {
                input: "1,2,3".to_string(),
                found: 3
            }
        );
        assert!("1,2,3,4,5,6,7".parse::<Dice>().is_err());
    }

    #[test]
    fn test_negative_or_non_numeric_face() {
        assert!(matches!(
            "1,2,3,4,5,-6".parse::<Dice>(),
            Err(DiceError::InvalidFace { .. })
        ));
        assert!(matches!(
            "1,2,3,4,five,6".parse::<Dice>(),
            Err(DiceError::InvalidFace { .. })
        ));
        assert!(matches!(
            "1,2,,4,5,6".parse::<Dice>(),
            Err(DiceError::InvalidFace { .. })
        ));
    }

    #[test]
    fn test_set_requires_three_dice() {
        let err = DiceSet::parse(&["1,2,3,4,5,6", "1,2,3,4,5,6"]).unwrap_err();
        assert_eq!(err, DiceError::TooFewDice { found: 2 });
    }

    #[test]
    fn test_set_reports_bad_die() {
        let err = DiceSet::parse(&["1,2,3,4,5,6", "1,2,3", "1,2,3,4,5,6"]).unwrap_err();
        assert!(matches!(err, DiceError::WrongFaceCount { found: 3, .. }));
    }

    #[test]
    fn test_remaining_is_by_identity() {
        // All three dice have the same faces but are still distinct choices
        let set = DiceSet::parse(&["1,1,1,1,1,1"; 3]).unwrap();
        let remaining = set.remaining(Some(DiceId::from_index(1)));

        assert_eq!(remaining, vec![DiceId::from_index(0), DiceId::from_index(2)]);
        assert_eq!(set.remaining(None).len(), 3);
    }
}
