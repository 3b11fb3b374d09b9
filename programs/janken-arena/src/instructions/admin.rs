//! Admin instructions

use crate::state::{Match, Mode};

/// Back to 0-0 in round 1; names and mode are kept
///
/// Valid in every phase. Any pending reveal is invalidated.
pub fn reset_match(state: &mut Match) {
    state.clear_progress();
    log::info!("Match reset ({} mode)", state.mode);
}

/// Reset and reseat both slots for `mode`
///
/// Names and computer flags are re-derived from the mode every time.
pub fn switch_mode(state: &mut Match, mode: Mode) {
    state.mode = mode;
    for (player, (name, is_computer)) in state.players.iter_mut().zip(mode.roster()) {
        player.name = name.to_string();
        player.is_computer = is_computer;
    }
    state.clear_progress();
    log::info!("Switched to {}", mode.title());
}
