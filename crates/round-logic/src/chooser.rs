//! Automatic move selection for computer-controlled slots
//!
//! The computer has no strategy: every pick is uniform over the three moves
//! and independent of every earlier pick.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::moves::Move;

/// Source of moves for computer-controlled slots
pub trait MoveChooser {
    fn choose_move(&mut self) -> Move;
}

/// Closures work as choosers, which keeps tests and replays deterministic
impl<F> MoveChooser for F
where
    F: FnMut() -> Move,
{
    fn choose_move(&mut self) -> Move {
        self()
    }
}

/// Uniform random chooser
///
/// Seeded from the OS by default; `seeded` gives a reproducible sequence.
#[derive(Clone, Debug)]
pub struct RandomChooser {
    rng: SmallRng,
}

impl RandomChooser {
    pub fn new() -> Self {
        Self { rng: SmallRng::from_os_rng() }
    }

    /// Same seed = same sequence of moves
    pub fn seeded(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveChooser for RandomChooser {
    fn choose_move(&mut self) -> Move {
        let pick = Move::ALL[self.rng.random_range(0..Move::ALL.len())];
        log::trace!("computer picked {}", pick);
        pick
    }
}
