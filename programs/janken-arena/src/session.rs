//! Event-loop driver for native hosts
//!
//! Keeps the reveal timers next to the controller. The host feeds it intents
//! and the current time; it never sleeps on its own. Timers that outlive
//! their reveal are not cancelled, they simply fail the token check when
//! they fire.

use std::time::Instant;

use round_logic::{MatchConfig, MoveChooser, RandomChooser, RoundRecord};

use crate::controller::{Intent, MatchController, PendingReveal};
use crate::error::Rejection;
use crate::state::Match;

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    token: u64,
    due: Instant,
}

pub struct Session<C = RandomChooser> {
    controller: MatchController<C>,
    timers: Vec<Scheduled>,
}

impl Session<RandomChooser> {
    pub fn new(config: MatchConfig) -> Self {
        Self::with_controller(MatchController::new(config))
    }
}

impl<C: MoveChooser> Session<C> {
    pub fn with_controller(controller: MatchController<C>) -> Self {
        Self { controller, timers: Vec::new() }
    }

    pub fn controller(&self) -> &MatchController<C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MatchController<C> {
        &mut self.controller
    }

    pub fn state(&self) -> &Match {
        self.controller.state()
    }

    /// Apply an intent received at `now`, arming a timer if a reveal started
    pub fn dispatch(&mut self, intent: Intent, now: Instant) -> Result<(), Rejection> {
        if let Some(pending) = self.controller.dispatch(intent)? {
            self.schedule(pending, now);
        }
        Ok(())
    }

    pub fn schedule(&mut self, pending: PendingReveal, now: Instant) {
        log::debug!("reveal {} due in {:?}", pending.token, pending.delay);
        self.timers.push(Scheduled { token: pending.token, due: now + pending.delay });
    }

    /// Earliest armed timer; the host may sleep until then
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// Fire every timer due at `now`, oldest first
    ///
    /// Returns the rounds that actually resolved; stale timers are dropped.
    pub fn tick(&mut self, now: Instant) -> Vec<RoundRecord> {
        let (mut due, waiting): (Vec<Scheduled>, Vec<Scheduled>) =
            std::mem::take(&mut self.timers).into_iter().partition(|t| t.due <= now);
        self.timers = waiting;
        due.sort_by_key(|t| (t.due, t.token));

        due.into_iter()
            .filter_map(|timer| self.controller.complete_reveal(timer.token).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Mode, Phase};
    use round_logic::{Move, Outcome, Slot};
    use std::time::Duration;

    fn session() -> Session<impl FnMut() -> Move> {
        let config = MatchConfig { win_threshold: 5, reveal_delay_ms: 900 };
        Session::with_controller(MatchController::with_chooser(config, || Move::Scissors))
    }

    fn submit(slot: Slot, choice: Move) -> Intent {
        Intent::SubmitMove { slot, choice }
    }

    #[test]
    fn test_reveal_waits_for_delay() {
        let start = Instant::now();
        let mut s = session();
        s.dispatch(submit(Slot::One, Move::Rock), start).unwrap();
        assert!(s.is_idle());
        s.dispatch(submit(Slot::Two, Move::Scissors), start).unwrap();
        assert_eq!(s.next_deadline(), Some(start + Duration::from_millis(900)));

        assert!(s.tick(start + Duration::from_millis(899)).is_empty());
        assert_eq!(s.state().phase, Phase::Revealing);

        let resolved = s.tick(start + Duration::from_millis(900));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].outcome, Outcome::FirstPlayerWins);
        assert_eq!(s.state().scores(), (1, 0));
        assert!(s.is_idle());
    }

    #[test]
    fn test_latest_reveal_wins() {
        let start = Instant::now();
        let mut s = session();
        s.dispatch(submit(Slot::One, Move::Rock), start).unwrap();
        s.dispatch(submit(Slot::Two, Move::Scissors), start).unwrap();

        let later = start + Duration::from_millis(300);
        s.dispatch(Intent::ResetMatch, later).unwrap();
        s.dispatch(submit(Slot::One, Move::Rock), later).unwrap();
        s.dispatch(submit(Slot::Two, Move::Paper), later).unwrap();

        // Both timers have fired by now; only the second reveal applies
        let resolved = s.tick(later + Duration::from_secs(1));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].move_b, Move::Paper);
        assert_eq!(s.state().scores(), (0, 1));
        assert_eq!(s.state().outcome, Some(Outcome::SecondPlayerWins));
    }

    #[test]
    fn test_mode_switch_drops_timer() {
        let start = Instant::now();
        let mut s = session();
        s.dispatch(submit(Slot::One, Move::Paper), start).unwrap();
        s.dispatch(submit(Slot::Two, Move::Rock), start).unwrap();
        s.dispatch(Intent::SwitchMode { mode: Mode::Cvc }, start).unwrap();

        assert!(s.tick(start + Duration::from_secs(2)).is_empty());
        assert_eq!(s.state().scores(), (0, 0));
        assert_eq!(s.state().phase, Phase::AwaitingMoves);
        assert!(s.is_idle());
    }

    #[test]
    fn test_cvc_rounds() {
        let start = Instant::now();
        let mut s = session();
        s.dispatch(Intent::SwitchMode { mode: Mode::Cvc }, start).unwrap();

        for round in 1..=3u32 {
            s.dispatch(Intent::PlayComputerRound, start).unwrap();
            let resolved = s.tick(start + Duration::from_secs(1));
            assert_eq!(resolved.len(), 1);
            assert_eq!(resolved[0].round, round);
            assert_eq!(resolved[0].outcome, Outcome::Draw);
            s.dispatch(Intent::AdvanceRound, start).unwrap();
        }
        assert_eq!(s.state().round, 4);
    }

    #[test]
    fn test_rejected_intent_arms_nothing() {
        let start = Instant::now();
        let mut s = session();
        assert_eq!(s.dispatch(Intent::PlayComputerRound, start), Err(Rejection::NotComputerMatch));
        assert!(s.is_idle());
    }
}
