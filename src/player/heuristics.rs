use crate::{
    core::{GameStatus, PlayerMark},
    game::tictactoe::TTTBoard,
};

/// Largest possible score. A win found `depth` plies below the root scores `WIN_SCORE - depth`.
pub const WIN_SCORE: i32 = 10;

/// Score of a finished game seen from `my_marker`, or `None` while the game goes on.
///
/// It is good to win. It is bad to lose.
/// If we can win, we want to win fast,
/// If we must lose, we want to lose slowly
pub fn ttt_terminal_score(my_marker: PlayerMark, b: &TTTBoard, depth: i32) -> Option<i32> {
    match b.game_status() {
        GameStatus::InProgress => None,
        GameStatus::Draw => Some(0),
        GameStatus::Won(mark, _) => {
            if mark == my_marker {
                Some(WIN_SCORE - depth)
            } else {
                Some(depth - WIN_SCORE)
            }
        }
    }
}
