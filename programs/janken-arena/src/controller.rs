//! Single-writer match controller
//!
//! Owns the `Match`, the config, the chooser for computer slots and the
//! observers. Every state change goes through here, so observers always see
//! a consistent snapshot and the reveal token always guards the delayed
//! resolution.
//!
//! The controller never waits. When a reveal starts it hands back a
//! [`PendingReveal`]; the host schedules it (a timer, `setTimeout`, a
//! [`Session`](crate::Session)) and calls [`MatchController::complete_reveal`]
//! when the delay expires.

use std::time::Duration;

use round_logic::{MatchConfig, Move, MoveChooser, RandomChooser, RoundRecord, Slot};
use serde::{Deserialize, Serialize};

use crate::error::Rejection;
use crate::instructions;
use crate::observer::{Cue, MatchObserver};
use crate::state::{Match, Mode};

/// A reveal waiting for its delay to expire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingReveal {
    pub token: u64,
    pub delay: Duration,
}

/// What an accepted submission did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Still waiting on the other player
    Recorded,
    RevealStarted(PendingReveal),
}

/// User intents from the presentation layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    SubmitMove {
        slot: Slot,
        #[serde(rename = "move")]
        choice: Move,
    },
    AdvanceRound,
    ResetMatch,
    SwitchMode { mode: Mode },
    PlayComputerRound,
    Rename { slot: Slot, name: String },
}

pub struct MatchController<C = RandomChooser> {
    state: Match,
    config: MatchConfig,
    chooser: C,
    observers: Vec<Box<dyn MatchObserver>>,
}

impl MatchController<RandomChooser> {
    pub fn new(config: MatchConfig) -> Self {
        Self::with_chooser(config, RandomChooser::new())
    }
}

impl Default for MatchController<RandomChooser> {
    fn default() -> Self {
        Self::new(MatchConfig::standard())
    }
}

impl<C: MoveChooser> MatchController<C> {
    /// Fresh pvp match in round 1
    pub fn with_chooser(config: MatchConfig, chooser: C) -> Self {
        Self {
            state: Match::new(Mode::Pvp),
            config,
            chooser,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &Match {
        &self.state
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn subscribe(&mut self, observer: Box<dyn MatchObserver>) {
        self.observers.push(observer);
    }

    /// Human move for `slot`
    ///
    /// In pve the computer answers immediately; once both moves are in the
    /// reveal starts.
    pub fn submit_move(&mut self, slot: Slot, choice: Move) -> Result<Submission, Rejection> {
        instructions::submit_move(&mut self.state, slot, choice)
            .inspect_err(|r| log::debug!("submit_move rejected: {}", r))?;

        let mut cues = vec![Cue::MoveSubmitted { slot }];
        cues.extend(
            instructions::fill_computer_moves(&mut self.state, &mut self.chooser)
                .into_iter()
                .map(|slot| Cue::MoveSubmitted { slot }),
        );

        let submission = match instructions::begin_reveal(&mut self.state) {
            Some(token) => Submission::RevealStarted(self.pending(token)),
            None => Submission::Recorded,
        };
        self.notify(&cues);
        Ok(submission)
    }

    /// Delay expired for the reveal carrying `token`
    pub fn complete_reveal(&mut self, token: u64) -> Result<RoundRecord, Rejection> {
        let record = instructions::complete_reveal(&mut self.state, token, self.config.win_threshold)
            .inspect_err(|r| log::debug!("dropping reveal: {}", r))?;

        let mut cues = vec![Cue::RevealResolved { outcome: record.outcome }];
        if let Some(slot) = self.state.winner {
            cues.push(Cue::MatchWon { slot });
        }
        self.notify(&cues);
        Ok(record)
    }

    pub fn advance_round(&mut self) -> Result<(), Rejection> {
        instructions::advance_round(&mut self.state)
            .inspect_err(|r| log::debug!("advance_round rejected: {}", r))?;
        self.notify(&[]);
        Ok(())
    }

    /// Trigger for computer-vs-computer rounds
    pub fn play_computer_round(&mut self) -> Result<PendingReveal, Rejection> {
        let token = instructions::play_computer_round(&mut self.state, &mut self.chooser)
            .inspect_err(|r| log::debug!("play_computer_round rejected: {}", r))?;
        self.notify(&[
            Cue::MoveSubmitted { slot: Slot::One },
            Cue::MoveSubmitted { slot: Slot::Two },
        ]);
        Ok(self.pending(token))
    }

    pub fn reset_match(&mut self) {
        instructions::reset_match(&mut self.state);
        self.notify(&[]);
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        instructions::switch_mode(&mut self.state, mode);
        self.notify(&[]);
    }

    pub fn rename(&mut self, slot: Slot, name: impl Into<String>) -> Result<(), Rejection> {
        instructions::rename_player(&mut self.state, slot, name.into())
            .inspect_err(|r| log::debug!("rename rejected: {}", r))?;
        self.notify(&[]);
        Ok(())
    }

    /// Route an intent to its operation
    ///
    /// Returns the reveal to schedule, if the intent started one.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<PendingReveal>, Rejection> {
        match intent {
            Intent::SubmitMove { slot, choice } => match self.submit_move(slot, choice)? {
                Submission::RevealStarted(pending) => Ok(Some(pending)),
                Submission::Recorded => Ok(None),
            },
            Intent::AdvanceRound => self.advance_round().map(|()| None),
            Intent::ResetMatch => {
                self.reset_match();
                Ok(None)
            }
            Intent::SwitchMode { mode } => {
                self.switch_mode(mode);
                Ok(None)
            }
            Intent::PlayComputerRound => self.play_computer_round().map(Some),
            Intent::Rename { slot, name } => self.rename(slot, name).map(|()| None),
        }
    }

    fn pending(&self, token: u64) -> PendingReveal {
        PendingReveal { token, delay: self.config.reveal_delay() }
    }

    fn notify(&mut self, cues: &[Cue]) {
        for observer in self.observers.iter_mut() {
            for cue in cues {
                observer.on_cue(*cue);
            }
            observer.on_change(&self.state);
        }
    }
}
