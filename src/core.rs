//! The core abstractions for this application
//!

use std::fmt::Display;

use clap::ValueEnum;
use enum_iterator::Sequence;
use rand::{
    rngs::{StdRng, ThreadRng},
    Rng as _,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::tictactoe::{TTTAddr, TTTBoard, WinLine};

/// The two marks on the board. The human always plays `Cross` (X) and the AI always plays `Naught` (O).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerMark {
    Cross,
    Naught,
}

impl PlayerMark {
    pub const HUMAN: PlayerMark = PlayerMark::Cross;
    pub const AI: PlayerMark = PlayerMark::Naught;

    pub fn other(&self) -> Self {
        match *self {
            Self::Cross => Self::Naught,
            Self::Naught => Self::Cross,
        }
    }
}

impl Display for PlayerMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerMark::Cross => write!(f, "X"),
            PlayerMark::Naught => write!(f, "O"),
        }
    }
}

/// The Player trait is the struct that represents a player.
pub trait Player {
    /// The play function is the main mechanic for the AIs
    /// You observe the whole board through a reference, and return the cell you want to occupy
    fn play(&mut self, b: &TTTBoard) -> Result<TTTAddr>;
}

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Draw,
    Won(PlayerMark, WinLine),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn winner(&self) -> Option<PlayerMark> {
        match self {
            GameStatus::Won(mark, _) => Some(*mark),
            _ => None,
        }
    }
}

/// How hard the AI tries. `Adversarial` plays perfectly and also moves the human's marks around.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Sequence, Serialize, Deserialize,
)]
pub enum Difficulty {
    /// Uniformly random moves
    Easy,
    /// Optimal 70% of the time, random otherwise
    Medium,
    /// Always optimal
    Hard,
    /// Optimal, takes any win-in-one, and cheats
    Adversarial,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Adversarial => "adversarial",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans share the board
    Pvp,
    /// Human (X) against the AI (O)
    Ai,
}

/// A source of uniform numbers in [0, 1).
///
/// Everything random in the AI goes through this, so tests can replay a fixed sequence.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Picks an index in `0..len` from a single draw. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let r = self.next_unit();
        ((r * len as f64) as usize).min(len - 1)
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RandomSource for ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Replays the given values in a loop.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f64>,
    pos: usize,
}

impl FixedSequence {
    /// # Panics
    /// If `values` is empty or holds something outside [0, 1)
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "a fixed sequence needs at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "values must lie in [0, 1)"
        );
        Self { values, pos: 0 }
    }

    /// How many values have been handed out so far
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}
