//! Round lifecycle instructions: reveal, resolve, advance

use round_logic::{MoveChooser, RoundRecord};

use crate::error::{require, require_phase, Rejection};
use crate::state::{Match, Mode, Phase};

/// Enter the reveal once both moves are in
///
/// Returns the token the delayed resolution must present, or `None` if the
/// round is still waiting on a move.
pub fn begin_reveal(state: &mut Match) -> Option<u64> {
    if state.phase != Phase::AwaitingMoves || state.moves().is_none() {
        return None;
    }

    state.phase = Phase::Revealing;
    state.outcome = None;
    state.reveal_token += 1;

    log::info!("Round {} revealing (token {})", state.round, state.reveal_token);

    Some(state.reveal_token)
}

/// Apply the outcome of a reveal whose delay has expired
///
/// A token from before the latest reveal, reset or mode switch is stale and
/// leaves the match untouched.
pub fn complete_reveal(state: &mut Match, token: u64, win_threshold: u32) -> Result<RoundRecord, Rejection> {
    require!(
        token == state.reveal_token,
        Rejection::StaleReveal { token, current: state.reveal_token }
    );
    require_phase(state.phase, Phase::Revealing)?;

    let (move_a, move_b) = state.moves().ok_or(Rejection::WrongPhase {
        expected: Phase::Revealing,
        actual: Phase::AwaitingMoves,
    })?;
    let record = RoundRecord::new(state.round, move_a, move_b);
    state.outcome = Some(record.outcome);
    state.phase = Phase::RoundResolved;

    if let Some(slot) = record.outcome.winner() {
        state.player_mut(slot).score += 1;
        if state.player(slot).score >= win_threshold {
            state.winner = Some(slot);
            state.phase = Phase::MatchWon;
            let (a, b) = state.scores();
            log::info!("{} wins the match {}-{}", state.player(slot).name, a, b);
        }
    }

    log::info!(
        "Round {} resolved: {} vs {} -> {}",
        record.round,
        record.move_a,
        record.move_b,
        record.outcome
    );

    Ok(record)
}

/// Clear the table for the next round
pub fn advance_round(state: &mut Match) -> Result<(), Rejection> {
    require_phase(state.phase, Phase::RoundResolved)?;

    for player in state.players.iter_mut() {
        player.current_move = None;
    }
    state.outcome = None;
    state.round += 1;
    state.phase = Phase::AwaitingMoves;

    log::info!("Round {} started", state.round);

    Ok(())
}

/// Both computers pick and the reveal starts straight away
pub fn play_computer_round<C: MoveChooser>(state: &mut Match, chooser: &mut C) -> Result<u64, Rejection> {
    require!(state.mode == Mode::Cvc, Rejection::NotComputerMatch);
    require_phase(state.phase, Phase::AwaitingMoves)?;

    for player in state.players.iter_mut() {
        player.current_move = Some(chooser.choose_move());
    }

    begin_reveal(state).ok_or(Rejection::WrongPhase {
        expected: Phase::AwaitingMoves,
        actual: state.phase,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use round_logic::{Move, Outcome, Slot};

    fn with_moves(a: Move, b: Move) -> Match {
        let mut state = Match::new(Mode::Pvp);
        state.player_mut(Slot::One).current_move = Some(a);
        state.player_mut(Slot::Two).current_move = Some(b);
        state
    }

    #[test]
    fn test_begin_reveal_needs_both_moves() {
        let mut state = Match::new(Mode::Pvp);
        state.player_mut(Slot::One).current_move = Some(Move::Rock);
        assert_eq!(begin_reveal(&mut state), None);
        assert_eq!(state.phase, Phase::AwaitingMoves);
        assert_eq!(state.reveal_token, 0);
    }

    #[test]
    fn test_rock_beats_scissors() {
        let mut state = with_moves(Move::Rock, Move::Scissors);
        let token = begin_reveal(&mut state).unwrap();
        assert_eq!(state.phase, Phase::Revealing);
        assert_eq!(state.outcome, None);

        let record = complete_reveal(&mut state, token, 5).unwrap();
        assert_eq!(record.outcome, Outcome::FirstPlayerWins);
        assert_eq!(state.outcome, Some(Outcome::FirstPlayerWins));
        assert_eq!(state.scores(), (1, 0));
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, Phase::RoundResolved);
    }

    #[test]
    fn test_draw_scores_nothing() {
        let mut state = with_moves(Move::Paper, Move::Paper);
        let token = begin_reveal(&mut state).unwrap();
        complete_reveal(&mut state, token, 5).unwrap();
        assert_eq!(state.outcome, Some(Outcome::Draw));
        assert_eq!(state.scores(), (0, 0));
    }

    #[test]
    fn test_stale_token_dropped() {
        let mut state = with_moves(Move::Rock, Move::Paper);
        let token = begin_reveal(&mut state).unwrap();
        state.reveal_token += 1;
        let before = state.clone();

        assert_eq!(
            complete_reveal(&mut state, token, 5),
            Err(Rejection::StaleReveal { token, current: token + 1 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_reveal_fires_once() {
        let mut state = with_moves(Move::Scissors, Move::Rock);
        let token = begin_reveal(&mut state).unwrap();
        complete_reveal(&mut state, token, 5).unwrap();
        assert!(matches!(
            complete_reveal(&mut state, token, 5),
            Err(Rejection::WrongPhase { .. })
        ));
        assert_eq!(state.scores(), (0, 1));
    }

    #[test]
    fn test_threshold_wins_match() {
        let mut state = with_moves(Move::Paper, Move::Rock);
        state.player_mut(Slot::One).score = 2;
        let token = begin_reveal(&mut state).unwrap();
        complete_reveal(&mut state, token, 3).unwrap();
        assert_eq!(state.phase, Phase::MatchWon);
        assert_eq!(state.winner, Some(Slot::One));
        assert_eq!(advance_round(&mut state), Err(Rejection::WrongPhase {
            expected: Phase::RoundResolved,
            actual: Phase::MatchWon,
        }));
    }

    #[test]
    fn test_advance_round() {
        let mut state = with_moves(Move::Rock, Move::Scissors);
        let token = begin_reveal(&mut state).unwrap();
        complete_reveal(&mut state, token, 5).unwrap();

        advance_round(&mut state).unwrap();
        assert_eq!(state.round, 2);
        assert_eq!(state.moves(), None);
        assert!(state.players.iter().all(|p| p.current_move.is_none()));
        assert_eq!(state.outcome, None);
        assert_eq!(state.phase, Phase::AwaitingMoves);
        assert_eq!(state.scores(), (1, 0));
    }

    #[test]
    fn test_advance_outside_resolved_is_rejected() {
        let mut state = Match::new(Mode::Pvp);
        assert!(advance_round(&mut state).is_err());
        assert_eq!(state.round, 1);

        let mut state = with_moves(Move::Rock, Move::Rock);
        begin_reveal(&mut state).unwrap();
        assert!(advance_round(&mut state).is_err());
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, Phase::Revealing);
    }

    #[test]
    fn test_computer_round() {
        let mut state = Match::new(Mode::Cvc);
        let mut picks = [Move::Rock, Move::Paper].into_iter().cycle();
        let mut chooser = move || picks.next().unwrap();

        let token = play_computer_round(&mut state, &mut chooser).unwrap();
        assert_eq!(state.moves(), Some((Move::Rock, Move::Paper)));
        let record = complete_reveal(&mut state, token, 5).unwrap();
        assert_eq!(record.outcome, Outcome::SecondPlayerWins);

        // Needs an advance before the next computer round
        assert!(play_computer_round(&mut state, &mut chooser).is_err());
    }

    #[test]
    fn test_computer_round_needs_cvc() {
        let mut state = Match::new(Mode::Pve);
        let mut chooser = || Move::Rock;
        assert_eq!(
            play_computer_round(&mut state, &mut chooser),
            Err(Rejection::NotComputerMatch)
        );
        assert_eq!(state.moves(), None);
    }
}
