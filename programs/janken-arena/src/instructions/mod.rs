//! Instruction handlers

pub mod admin;
pub mod player;
pub mod round;

pub use admin::*;
pub use player::*;
pub use round::*;
