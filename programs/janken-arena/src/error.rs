//! Rejection codes for operations the match cannot accept right now
//!
//! None of these are failures the player needs to see. The UI ignores them;
//! tests assert on them.

use core::fmt;

use round_logic::Slot;

use crate::state::Phase;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The operation is not valid in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// Moves for this slot come from the automatic chooser.
    ComputerControlled(Slot),
    /// This slot already picked a move this round.
    MoveAlreadySet(Slot),
    /// Computer rounds are only triggered in computer-vs-computer mode.
    NotComputerMatch,
    /// A delayed reveal fired after the match moved on.
    StaleReveal { token: u64, current: u64 },
    /// Names are frozen while a reveal is in progress.
    RenameDuringReveal,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::WrongPhase { expected, actual } =>
                write!(f, "expected phase {}, match is {}", expected, actual),
            Rejection::ComputerControlled(slot) =>
                write!(f, "{} is computer-controlled", slot),
            Rejection::MoveAlreadySet(slot) =>
                write!(f, "{} already chose this round", slot),
            Rejection::NotComputerMatch =>
                write!(f, "computer rounds need computer-vs-computer mode"),
            Rejection::StaleReveal { token, current } =>
                write!(f, "reveal {} is stale (current token {})", token, current),
            Rejection::RenameDuringReveal =>
                write!(f, "names cannot change during a reveal"),
        }
    }
}

impl std::error::Error for Rejection {}

/// Return early with a rejection unless the condition holds
macro_rules! require {
    ($cond:expr, $rejection:expr $(,)?) => {
        if !($cond) {
            return Err($rejection);
        }
    };
}

pub(crate) use require;

/// Reject unless the match is in `expected`
pub(crate) fn require_phase(actual: Phase, expected: Phase) -> Result<(), Rejection> {
    require!(actual == expected, Rejection::WrongPhase { expected, actual });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_phase() {
        assert_eq!(require_phase(Phase::Revealing, Phase::Revealing), Ok(()));
        assert_eq!(
            require_phase(Phase::MatchWon, Phase::AwaitingMoves),
            Err(Rejection::WrongPhase {
                expected: Phase::AwaitingMoves,
                actual: Phase::MatchWon,
            })
        );
    }

    #[test]
    fn test_display() {
        let r = Rejection::WrongPhase { expected: Phase::RoundResolved, actual: Phase::Revealing };
        assert_eq!(r.to_string(), "expected phase round-resolved, match is revealing");
        assert_eq!(Rejection::ComputerControlled(Slot::Two).to_string(), "P2 is computer-controlled");
    }
}
