use log::debug;

use crate::{
    core::{Player, RandomSource},
    error::{Result, TttError},
    game::tictactoe::{TTTAddr, TTTBoard},
};

/// A uniformly random empty cell, one draw from `rng`
pub fn random_move<R: RandomSource + ?Sized>(b: &TTTBoard, rng: &mut R) -> Result<TTTAddr> {
    let moves = b.valid_moves();
    if moves.is_empty() {
        return Err(TttError::NoMoveAvailable);
    }
    Ok(moves[rng.pick_index(moves.len())])
}

pub struct RandomAi<R> {
    rng: R,
    pub name: String,
}

impl<R: RandomSource> RandomAi<R> {
    pub fn new(name: impl Into<String>, rng: R) -> Self {
        Self {
            rng,
            name: name.into(),
        }
    }
}

impl<R: RandomSource> Player for RandomAi<R> {
    fn play(&mut self, b: &TTTBoard) -> Result<TTTAddr> {
        let addr = random_move(b, &mut self.rng)?;
        debug!("Random AI `{}` plays {}", self.name, addr);
        Ok(addr)
    }
}
