//! Round Logic for Janken Arena
//!
//! Core rules for Rock Paper Scissors: the moves, the resolver that maps two
//! simultaneous moves to an outcome, and the random chooser used for
//! computer-controlled players. No state lives here; sequencing rounds into
//! a match is the job of `janken-arena`.

mod chooser;
mod game;
mod moves;

pub use chooser::{MoveChooser, RandomChooser};
pub use game::{
    ConfigError, MatchConfig, RoundRecord, DEFAULT_REVEAL_DELAY_MS, DEFAULT_WIN_THRESHOLD,
};
pub use moves::{Move, Outcome, ParseMoveError, Slot};

/// Outcome of one round, named by the argument position of the winning move
pub fn resolve(a: Move, b: Move) -> Outcome {
    if a == b {
        Outcome::Draw
    } else if a.beats(b) {
        Outcome::FirstPlayerWins
    } else {
        Outcome::SecondPlayerWins
    }
}
