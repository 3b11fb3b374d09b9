//! Match state definitions

use core::fmt;

use round_logic::{Move, Outcome, RoundRecord, Slot};
use serde::{Deserialize, Serialize};

/// Who controls each seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Player vs Player
    #[default]
    Pvp,
    /// Player vs Computer
    Pve,
    /// Computer vs Computer
    Cvc,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Pvp, Mode::Pve, Mode::Cvc];

    /// Default (name, is_computer) for each slot
    pub fn roster(self) -> [(&'static str, bool); 2] {
        match self {
            Mode::Pvp => [("Player 1", false), ("Player 2", false)],
            Mode::Pve => [("You", false), ("Computer", true)],
            Mode::Cvc => [("Computer 1", true), ("Computer 2", true)],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Pvp => "Player vs Player",
            Mode::Pve => "Player vs Computer",
            Mode::Cvc => "Computer vs Computer",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Pvp => "pvp",
            Mode::Pve => "pve",
            Mode::Cvc => "cvc",
        })
    }
}

impl core::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvp" => Ok(Mode::Pvp),
            "pve" | "pvc" => Ok(Mode::Pve),
            "cvc" => Ok(Mode::Cvc),
            _ => Err(format!("unknown mode {:?} (expected pvp, pve or cvc)", s)),
        }
    }
}

/// Match state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Accepting move submissions
    #[default]
    AwaitingMoves,
    /// Both moves are in; the outcome is applied when the delay expires
    Revealing,
    /// Outcome shown, waiting for the next round
    RoundResolved,
    /// A player reached the win threshold
    MatchWon,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::AwaitingMoves => "awaiting-moves",
            Phase::Revealing => "revealing",
            Phase::RoundResolved => "round-resolved",
            Phase::MatchWon => "match-won",
        })
    }
}

/// One seat at the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub slot: Slot,
    pub name: String,
    pub score: u32,
    pub current_move: Option<Move>,
    pub is_computer: bool,
}

impl Player {
    pub fn new(slot: Slot, name: impl Into<String>, is_computer: bool) -> Self {
        Self {
            slot,
            name: name.into(),
            score: 0,
            current_move: None,
            is_computer,
        }
    }
}

/// The whole game, as pushed to the presentation layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub mode: Mode,
    pub phase: Phase,
    pub players: [Player; 2],
    /// Starts at 1, bumped by every advance
    pub round: u32,
    /// Set only while both current moves are set
    pub outcome: Option<Outcome>,
    pub winner: Option<Slot>,
    /// Bumped whenever a pending reveal must stop counting
    pub reveal_token: u64,
}

impl Match {
    pub fn new(mode: Mode) -> Self {
        let [(name_a, cpu_a), (name_b, cpu_b)] = mode.roster();
        Self {
            mode,
            phase: Phase::AwaitingMoves,
            players: [
                Player::new(Slot::One, name_a, cpu_a),
                Player::new(Slot::Two, name_b, cpu_b),
            ],
            round: 1,
            outcome: None,
            winner: None,
            reveal_token: 0,
        }
    }

    pub fn player(&self, slot: Slot) -> &Player {
        &self.players[slot.index()]
    }

    pub fn player_mut(&mut self, slot: Slot) -> &mut Player {
        &mut self.players[slot.index()]
    }

    /// Both current moves, once both are in
    pub fn moves(&self) -> Option<(Move, Move)> {
        match (self.players[0].current_move, self.players[1].current_move) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// The round on display, if it has been resolved
    pub fn last_round(&self) -> Option<RoundRecord> {
        let (move_a, move_b) = self.moves()?;
        let outcome = self.outcome?;
        Some(RoundRecord { round: self.round, move_a, move_b, outcome })
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.players[0].score, self.players[1].score)
    }

    /// Banner text for the current result
    pub fn headline(&self) -> Option<String> {
        if let Some(slot) = self.winner {
            return Some(format!("{} wins the match!", self.player(slot).name));
        }
        match self.outcome? {
            Outcome::Draw => Some("Draw!".to_string()),
            outcome => {
                let slot = outcome.winner()?;
                Some(format!("{} wins this round!", self.player(slot).name))
            }
        }
    }

    /// Back to round 1 at 0-0, keeping mode and names; stales any pending reveal
    pub(crate) fn clear_progress(&mut self) {
        for player in self.players.iter_mut() {
            player.score = 0;
            player.current_move = None;
        }
        self.round = 1;
        self.outcome = None;
        self.winner = None;
        self.phase = Phase::AwaitingMoves;
        self.reveal_token += 1;
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_defaults() {
        let m = Match::default();
        assert_eq!(m.mode, Mode::Pvp);
        assert_eq!(m.phase, Phase::AwaitingMoves);
        assert_eq!(m.round, 1);
        assert_eq!(m.scores(), (0, 0));
        assert_eq!(m.player(Slot::One).name, "Player 1");
        assert_eq!(m.player(Slot::Two).name, "Player 2");
        assert!(m.players.iter().all(|p| !p.is_computer && p.current_move.is_none()));
        assert_eq!(m.outcome, None);
        assert_eq!(m.headline(), None);
    }

    #[test]
    fn test_mode_rosters() {
        let pve = Match::new(Mode::Pve);
        assert_eq!(pve.player(Slot::One).name, "You");
        assert!(!pve.player(Slot::One).is_computer);
        assert_eq!(pve.player(Slot::Two).name, "Computer");
        assert!(pve.player(Slot::Two).is_computer);

        let cvc = Match::new(Mode::Cvc);
        assert_eq!(cvc.player(Slot::One).name, "Computer 1");
        assert_eq!(cvc.player(Slot::Two).name, "Computer 2");
        assert!(cvc.players.iter().all(|p| p.is_computer));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("PvE".parse::<Mode>(), Ok(Mode::Pve));
        assert_eq!("cvc".parse::<Mode>(), Ok(Mode::Cvc));
        assert!("coop".parse::<Mode>().is_err());
    }

    #[test]
    fn test_headline() {
        let mut m = Match::default();
        m.player_mut(Slot::One).current_move = Some(Move::Rock);
        m.player_mut(Slot::Two).current_move = Some(Move::Scissors);
        m.outcome = Some(Outcome::FirstPlayerWins);
        assert_eq!(m.headline().as_deref(), Some("Player 1 wins this round!"));

        m.outcome = Some(Outcome::Draw);
        assert_eq!(m.headline().as_deref(), Some("Draw!"));

        m.winner = Some(Slot::Two);
        assert_eq!(m.headline().as_deref(), Some("Player 2 wins the match!"));
    }

    #[test]
    fn test_last_round_needs_both_moves() {
        let mut m = Match::default();
        m.player_mut(Slot::One).current_move = Some(Move::Paper);
        assert_eq!(m.moves(), None);
        assert_eq!(m.last_round(), None);

        m.player_mut(Slot::Two).current_move = Some(Move::Rock);
        m.outcome = Some(Outcome::FirstPlayerWins);
        let record = m.last_round().unwrap();
        assert_eq!(record.round, 1);
        assert_eq!(record.move_a, Move::Paper);
        assert_eq!(record.outcome, Outcome::FirstPlayerWins);
    }

    #[test]
    fn test_snapshot_json() {
        let m = Match::new(Mode::Pve);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["mode"], "pve");
        assert_eq!(json["phase"], "awaiting_moves");
        assert_eq!(json["players"][1]["slot"], 2);
        assert_eq!(json["players"][1]["is_computer"], true);
        assert_eq!(json["outcome"], serde_json::Value::Null);
    }
}
