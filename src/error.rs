//! Error types for the game core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TttError {
    /// The target cell is occupied, off the board, or the game does not accept moves right now
    #[error("Illegal move at {index}: {reason}")]
    IllegalMove { index: usize, reason: &'static str },

    /// The board is full
    #[error("No move available, the board is full")]
    NoMoveAvailable,

    /// A cheat was triggered but there is no other empty cell to move the mark to
    #[error("No cell to relocate the mark to")]
    NoRelocationTarget,

    /// A board could not be parsed from text, or no game could have reached it
    #[error("Bad board: {0}")]
    BadBoard(String),

    /// The console stopped giving us lines, or stopped taking our prompts
    #[error("Input closed: {0}")]
    InputClosed(String),
}

pub type Result<T> = std::result::Result<T, TttError>;
