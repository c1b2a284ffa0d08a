//! Tic-tac-toe against an AI that searches the whole game tree, and at its hardest setting cheats.

pub mod core;
pub mod error;
pub mod game;
pub mod player;
pub mod session;

pub use error::{Result, TttError};
