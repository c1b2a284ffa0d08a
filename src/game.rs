use log::debug;

use crate::core::{GameStatus, Player, PlayerMark};
use crate::error::Result;
use crate::game::tictactoe::TTTBoard;

pub mod tictactoe;

/// Plays a straight game, no cheating, X first. Returns the final board and how it ended.
pub fn run_match(
    crosses: &mut dyn Player,
    naughts: &mut dyn Player,
) -> Result<(TTTBoard, GameStatus)> {
    let mut current_player = PlayerMark::Cross;
    let mut board = TTTBoard::new();
    while !board.game_is_over() {
        let action = match current_player {
            PlayerMark::Cross => crosses.play(&board)?,
            PlayerMark::Naught => naughts.play(&board)?,
        };
        debug!("Player {} played {}", current_player, &action);
        board.place_mark(action, current_player)?;
        debug!("\n{}", board);
        current_player = current_player.other();
    }
    let status = board.game_status();
    debug!("Game ended with {:?}", status);
    Ok((board, status))
}
