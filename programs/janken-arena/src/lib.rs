//! Janken Arena - Rock Paper Scissors match controller
//!
//! Sequences rounds of Rock Paper Scissors into a first-to-N match across
//! three modes (player vs player, player vs computer, computer vs computer).
//! The rules live in `round-logic`; this crate owns the state machine:
//!
//! ```text
//! awaiting-moves -> revealing -> round-resolved -> awaiting-moves
//!                                               \-> match-won (until reset)
//! ```
//!
//! Hosts:
//! - Native (`Session`, and the `janken` terminal binary with `cli`)
//! - WASM (`WebGame`, with `wasm`)

mod controller;
mod error;
mod instructions;
mod observer;
#[cfg(any(feature = "wasm", test))]
mod relay;
mod session;
mod state;

#[cfg(feature = "wasm")]
mod wasm;

pub use controller::{Intent, MatchController, PendingReveal, Submission};
pub use error::Rejection;
pub use observer::{Cue, MatchObserver};
pub use session::Session;
pub use state::{Match, Mode, Phase, Player};

pub use round_logic::{
    resolve, MatchConfig, Move, MoveChooser, Outcome, RandomChooser, RoundRecord, Slot,
};
