//! Janken Binary
//!
//! Play Rock Paper Scissors in the terminal. Hot-seat for pvp, against the
//! computer for pve, or watch two computers in cvc.
//!
//! Options: --mode, --threshold, --delay-ms, --config

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use dialoguer::{Input, Select};
use janken_arena::*;

#[derive(Parser)]
#[command(author, version, about = "Rock Paper Scissors, first to N", long_about = None)]
struct Args {
    /// pvp, pve or cvc
    #[arg(long, default_value = "pve")]
    mode: Mode,
    /// Points needed to win the match
    #[arg(long)]
    threshold: Option<u32>,
    /// Reveal pause in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// JSON match config, overridden by the flags above
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Stands in for the sound layer
struct Announcer;

impl MatchObserver for Announcer {
    fn on_cue(&mut self, cue: Cue) {
        match cue {
            Cue::MoveSubmitted { slot } => println!("  {} is ready", slot),
            Cue::RevealResolved { .. } => println!("  Jan... Ken... Pon!"),
            Cue::MatchWon { slot } => println!("  *** {} takes the match ***", slot),
        }
    }
}

fn config(args: &Args) -> Result<MatchConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => MatchConfig::standard(),
    };
    if let Some(threshold) = args.threshold {
        config.win_threshold = threshold;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.reveal_delay_ms = delay_ms;
    }
    config.validate()?;
    Ok(config)
}

fn scoreboard(state: &Match) {
    let [a, b] = &state.players;
    println!();
    println!("Round {}  |  {} {} - {} {}", state.round, a.name, a.score, b.score, b.name);
}

fn summary(state: &Match) {
    if let Some(headline) = state.headline() {
        println!("{}", headline);
    }
    if let Some(record) = state.last_round() {
        let [a, b] = &state.players;
        println!("  {:<16}{}", a.name, record.move_a.label());
        println!("  {:<16}{}", b.name, record.move_b.label());
    }
}

/// One entry in a menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Play(Move),
    PlayRound,
    NextRound,
    Reset,
    SwitchMode,
    Rename,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Play(choice) => choice.label(),
            Action::PlayRound => "Play round",
            Action::NextRound => "Next round",
            Action::Reset => "Reset match",
            Action::SwitchMode => "Switch mode",
            Action::Rename => "Rename",
            Action::Quit => "Quit",
        }
    }
}

/// Prompt and menu for the current phase; `None` while a reveal is pending
///
/// Reset and switch mode are offered everywhere since the match accepts them
/// in any phase.
fn actions(state: &Match) -> Option<(String, Vec<Action>)> {
    let (prompt, mut actions) = match state.phase {
        Phase::Revealing => return None,
        Phase::AwaitingMoves if state.mode == Mode::Cvc => {
            ("Computers are ready".to_string(), vec![Action::PlayRound, Action::Rename])
        }
        Phase::AwaitingMoves => match waiting(state) {
            Some(player) => (
                format!("{}, choose", player.name),
                Move::ALL.iter().map(|&m| Action::Play(m)).collect(),
            ),
            None => ("Waiting".to_string(), Vec::new()),
        },
        Phase::RoundResolved => ("Next?".to_string(), vec![Action::NextRound, Action::Rename]),
        Phase::MatchWon => ("Match over".to_string(), vec![Action::Rename]),
    };
    actions.extend([Action::Reset, Action::SwitchMode, Action::Quit]);
    Some((prompt, actions))
}

/// First human seat still owing a move
fn waiting(state: &Match) -> Option<&Player> {
    state
        .players
        .iter()
        .find(|p| !p.is_computer && p.current_move.is_none())
}

fn menu(prompt: &str, items: &[&str]) -> Result<usize, Box<dyn std::error::Error>> {
    Ok(Select::new().with_prompt(prompt).items(items).default(0).interact()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut session = Session::new(config(&args)?);
    session.controller_mut().subscribe(Box::new(Announcer));
    session.dispatch(Intent::SwitchMode { mode: args.mode }, Instant::now())?;
    log::info!(
        "{} match, first to {}",
        args.mode.title(),
        session.controller().config().win_threshold
    );

    loop {
        let state = session.state().clone();
        let Some((prompt, actions)) = actions(&state) else {
            if let Some(deadline) = session.next_deadline() {
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
            }
            session.tick(Instant::now());
            continue;
        };

        match state.phase {
            Phase::AwaitingMoves => scoreboard(&state),
            _ => summary(&state),
        }
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let intent = match actions[menu(&prompt, &labels)?] {
            Action::Play(choice) => match waiting(&state) {
                Some(player) => Intent::SubmitMove { slot: player.slot, choice },
                None => continue,
            },
            Action::PlayRound => Intent::PlayComputerRound,
            Action::NextRound => Intent::AdvanceRound,
            Action::Reset => Intent::ResetMatch,
            Action::SwitchMode => switch_mode()?,
            Action::Rename => rename(&state)?,
            Action::Quit => break,
        };

        if let Err(rejection) = session.dispatch(intent, Instant::now()) {
            log::warn!("{}", rejection);
        }
    }

    let (a, b) = session.state().scores();
    println!("Final score {}-{}", a, b);
    Ok(())
}

fn switch_mode() -> Result<Intent, Box<dyn std::error::Error>> {
    let titles: Vec<&str> = Mode::ALL.iter().map(|m| m.title()).collect();
    let mode = Mode::ALL[menu("Mode", &titles)?];
    Ok(Intent::SwitchMode { mode })
}

fn rename(state: &Match) -> Result<Intent, Box<dyn std::error::Error>> {
    let names: Vec<&str> = state.players.iter().map(|p| p.name.as_str()).collect();
    let slot = Slot::BOTH[menu("Rename who?", &names)?];
    let name: String = Input::new().with_prompt("New name").interact_text()?;
    Ok(Intent::Rename { slot, name })
}
