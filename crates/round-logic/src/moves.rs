//! Moves, player slots and round outcomes

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// A move in Rock Paper Scissors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Every move, in display order
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move this one defeats
    pub fn defeats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// True when `self` beats `other` under the cyclic dominance relation
    pub fn beats(self, other: Move) -> bool {
        self.defeats() == other
    }

    /// Short lowercase name, matching the serialized form
    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    /// Label shown next to a revealed choice
    pub fn label(self) -> &'static str {
        match self {
            Move::Rock => "✊ Rock",
            Move::Paper => "✋ Paper",
            Move::Scissors => "✌️ Scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text that does not name a move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseMoveError(pub String);

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown move {:?} (expected rock, paper or scissors)", self.0)
    }
}

impl std::error::Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

/// Player seat, serialized as `1` or `2`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::One, Slot::Two];

    /// Array index for per-slot storage
    pub fn index(self) -> usize {
        match self {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> u8 {
        slot.number()
    }
}

impl TryFrom<u8> for Slot {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Slot::One),
            2 => Ok(Slot::Two),
            _ => Err(format!("player slot must be 1 or 2, got {}", n)),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// Outcome of one round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "p1")]
    FirstPlayerWins,
    #[serde(rename = "p2")]
    SecondPlayerWins,
    #[serde(rename = "draw")]
    Draw,
}

impl Outcome {
    /// Slot that won the round, `None` for a draw
    pub fn winner(self) -> Option<Slot> {
        match self {
            Outcome::FirstPlayerWins => Some(Slot::One),
            Outcome::SecondPlayerWins => Some(Slot::Two),
            Outcome::Draw => None,
        }
    }

    /// The same outcome seen with the two players swapped
    pub fn swapped(self) -> Outcome {
        match self {
            Outcome::FirstPlayerWins => Outcome::SecondPlayerWins,
            Outcome::SecondPlayerWins => Outcome::FirstPlayerWins,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::FirstPlayerWins => "p1",
            Outcome::SecondPlayerWins => "p2",
            Outcome::Draw => "draw",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance_cycle() {
        assert!(Move::Rock.beats(Move::Scissors));
        assert!(Move::Paper.beats(Move::Rock));
        assert!(Move::Scissors.beats(Move::Paper));

        for m in Move::ALL {
            assert!(!m.beats(m), "{} must not beat itself", m);
            assert!(!m.defeats().beats(m));
        }
    }

    #[test]
    fn test_parse_move() {
        assert_eq!("rock".parse::<Move>(), Ok(Move::Rock));
        assert_eq!(" Paper ".parse::<Move>(), Ok(Move::Paper));
        assert_eq!("S".parse::<Move>(), Ok(Move::Scissors));
        assert!("lizard".parse::<Move>().is_err());
    }

    #[test]
    fn test_move_json() {
        assert_eq!(serde_json::to_string(&Move::Scissors).unwrap(), "\"scissors\"");
        let m: Move = serde_json::from_str("\"paper\"").unwrap();
        assert_eq!(m, Move::Paper);
    }

    #[test]
    fn test_slot_json() {
        assert_eq!(serde_json::to_string(&Slot::Two).unwrap(), "2");
        let s: Slot = serde_json::from_str("1").unwrap();
        assert_eq!(s, Slot::One);
        assert!(serde_json::from_str::<Slot>("3").is_err());
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(Slot::One.index(), 0);
        assert_eq!(Slot::Two.index(), 1);
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(Outcome::FirstPlayerWins.winner(), Some(Slot::One));
        assert_eq!(Outcome::SecondPlayerWins.winner(), Some(Slot::Two));
        assert_eq!(Outcome::Draw.winner(), None);
        assert_eq!(serde_json::to_string(&Outcome::Draw).unwrap(), "\"draw\"");
        assert_eq!(serde_json::to_string(&Outcome::FirstPlayerWins).unwrap(), "\"p1\"");
    }
}
