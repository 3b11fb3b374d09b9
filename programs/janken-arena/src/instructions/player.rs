//! Player instructions

use round_logic::{Move, MoveChooser, Slot};

use crate::error::{require, require_phase, Rejection};
use crate::state::{Match, Phase};

/// Record a human player's move for the current round
pub fn submit_move(state: &mut Match, slot: Slot, choice: Move) -> Result<(), Rejection> {
    require_phase(state.phase, Phase::AwaitingMoves)?;

    let player = state.player_mut(slot);
    require!(!player.is_computer, Rejection::ComputerControlled(slot));
    require!(player.current_move.is_none(), Rejection::MoveAlreadySet(slot));

    player.current_move = Some(choice);

    // The move stays hidden until the reveal
    log::info!("{} locked in a move for round {}", slot, state.round);

    Ok(())
}

/// Let the chooser pick for every computer slot still missing a move
///
/// Returns the slots that were filled.
pub fn fill_computer_moves<C: MoveChooser>(state: &mut Match, chooser: &mut C) -> Vec<Slot> {
    if state.phase != Phase::AwaitingMoves {
        return Vec::new();
    }

    let mut filled = Vec::new();
    for player in state.players.iter_mut() {
        if player.is_computer && player.current_move.is_none() {
            player.current_move = Some(chooser.choose_move());
            filled.push(player.slot);
        }
    }
    filled
}

/// Change a display name; refused while a reveal is running
pub fn rename_player(state: &mut Match, slot: Slot, name: String) -> Result<(), Rejection> {
    require!(state.phase != Phase::Revealing, Rejection::RenameDuringReveal);

    let player = state.player_mut(slot);
    log::info!("{} renamed from {:?} to {:?}", slot, player.name, name);
    player.name = name;

    Ok(())
}
