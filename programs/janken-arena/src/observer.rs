//! Hooks for the presentation layer
//!
//! Renderers get a snapshot after every accepted change. Sound and animation
//! layers get cues. Neither can fail or block the match.

use round_logic::{Outcome, Slot};
use serde::{Deserialize, Serialize};

use crate::state::Match;

/// Moments worth a sound or an animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum Cue {
    MoveSubmitted { slot: Slot },
    RevealResolved { outcome: Outcome },
    MatchWon { slot: Slot },
}

pub trait MatchObserver {
    fn on_change(&mut self, _snapshot: &Match) {}

    fn on_cue(&mut self, _cue: Cue) {}
}
