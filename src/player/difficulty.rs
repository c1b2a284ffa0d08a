use log::debug;

use crate::{
    core::{Difficulty, Player, PlayerMark, RandomSource},
    error::Result,
    game::tictactoe::{TTTAddr, TTTBoard},
    player::{adversarial::impossible_move, alpha_beta::ABAi, random::random_move},
};

/// How often `Medium` plays the searched move instead of a random one
pub const MEDIUM_BEST_MOVE_CHANCE: f64 = 0.7;

/// Picks a move for `mark` the way the given difficulty plays.
///
/// `Adversarial` only plays as the AI mark; asked to play the human side it behaves like `Hard`.
pub fn select_move<R: RandomSource + ?Sized>(
    b: &TTTBoard,
    mark: PlayerMark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<TTTAddr> {
    let addr = match difficulty {
        Difficulty::Easy => random_move(b, rng)?,
        Difficulty::Medium => {
            if rng.next_unit() < MEDIUM_BEST_MOVE_CHANCE {
                ABAi::new(mark).best_move(b)?
            } else {
                random_move(b, rng)?
            }
        }
        Difficulty::Hard => ABAi::new(mark).best_move(b)?,
        Difficulty::Adversarial if mark == PlayerMark::AI => impossible_move(b)?,
        Difficulty::Adversarial => ABAi::new(mark).best_move(b)?,
    };
    debug!("{difficulty} {mark} picks {addr}");
    Ok(addr)
}

/// The AI's move, playing O
pub fn select_ai_move<R: RandomSource + ?Sized>(
    b: &TTTBoard,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<TTTAddr> {
    select_move(b, PlayerMark::AI, difficulty, rng)
}

/// A player at a fixed difficulty, with its own random source
pub struct DifficultyAi<R> {
    mark: PlayerMark,
    difficulty: Difficulty,
    rng: R,
}

impl<R: RandomSource> DifficultyAi<R> {
    pub fn new(mark: PlayerMark, difficulty: Difficulty, rng: R) -> Self {
        Self {
            mark,
            difficulty,
            rng,
        }
    }
}

impl<R: RandomSource> Player for DifficultyAi<R> {
    fn play(&mut self, b: &TTTBoard) -> Result<TTTAddr> {
        select_move(b, self.mark, self.difficulty, &mut self.rng)
    }
}
