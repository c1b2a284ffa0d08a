use log::debug;

use crate::{
    core::{Player, PlayerMark},
    error::{Result, TttError},
    game::tictactoe::{TTTAddr, TTTBoard},
    player::heuristics::ttt_terminal_score,
};

/// Exhaustive minimax with alpha-beta pruning.
///
/// The search works in place on a scratch copy of the board: every candidate is placed, searched
/// and removed again before the next one, so the caller's board is never touched.
pub struct ABAi {
    my_marker: PlayerMark,
    /// A performance counter. If we prune well, this number is small
    n_nodes_visited: usize,
}

impl ABAi {
    pub fn new(mark: PlayerMark) -> Self {
        ABAi {
            my_marker: mark,
            n_nodes_visited: 0,
        }
    }

    pub fn nodes_visited(&self) -> usize {
        self.n_nodes_visited
    }

    /// The exact minimax value of every legal move, in ascending cell order.
    /// Each root move gets a fresh window, so pruning never touches these numbers.
    pub fn move_scores(&mut self, b: &TTTBoard) -> Vec<(TTTAddr, i32)> {
        let mut scratch = *b;
        let my_marker = self.my_marker;
        let mut scores = Vec::with_capacity(9);
        for addr in b.valid_moves() {
            scratch.put(addr.0, my_marker);
            let score = self.alphabeta(&mut scratch, 0, i32::MIN, i32::MAX, false);
            scratch.take(addr.0);
            scores.push((addr, score));
        }
        scores
    }

    /// The move with the highest score. Ties go to the lowest cell.
    pub fn best_move(&mut self, b: &TTTBoard) -> Result<TTTAddr> {
        let mut best: Option<(TTTAddr, i32)> = None;
        for (addr, score) in self.move_scores(b) {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((addr, score));
            }
        }
        best.map(|(addr, _)| addr).ok_or(TttError::NoMoveAvailable)
    }

    /// compute the score of a node by use of alpha-beta with pruning
    /// Assumes I want to maximize my score, and the opponent makes moves to minimize it
    fn alphabeta(&mut self, node: &mut TTTBoard, depth: i32, a: i32, b: i32, my_move: bool) -> i32 {
        self.n_nodes_visited += 1;
        if let Some(s) = ttt_terminal_score(self.my_marker, node, depth) {
            return s;
        }
        let moves = node.valid_moves();
        let mut a = a;
        let mut b = b;
        let my_marker = self.my_marker; // take a copy here
        if my_move {
            let mut value = i32::MIN;
            for addr in moves {
                node.put(addr.0, my_marker);
                let newval = self.alphabeta(node, depth + 1, a, b, false);
                node.take(addr.0);
                value = value.max(newval);
                a = a.max(newval);
                if b <= a {
                    break;
                }
            }
            value
        } else {
            let mut value = i32::MAX;
            for addr in moves {
                node.put(addr.0, my_marker.other());
                let newval = self.alphabeta(node, depth + 1, a, b, true);
                node.take(addr.0);
                value = value.min(newval);
                b = b.min(newval);
                if b <= a {
                    break;
                }
            }
            value
        }
    }
}

impl Player for ABAi {
    fn play(&mut self, b: &TTTBoard) -> Result<TTTAddr> {
        self.best_move(b)
    }
}

impl Drop for ABAi {
    fn drop(&mut self) {
        debug!("ABAi visited {} nodes", self.n_nodes_visited);
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn can_find_winning_move() {
        let b = TTTBoard::from_str("   oo xx ").unwrap();
        let mut ai = ABAi::new(PlayerMark::Naught);
        assert_eq!(ai.best_move(&b), Ok(TTTAddr(5)));
    }

    #[test]
    fn can_block_winning_move() {
        let b = TTTBoard::from_str("xx       ").unwrap();
        let mut ai = ABAi::new(PlayerMark::Naught);
        assert_eq!(ai.best_move(&b), Ok(TTTAddr(2)));
    }

    #[test]
    fn prefers_the_faster_win() {
        let b = TTTBoard::from_str("oo xx    ").unwrap();
        let mut ai = ABAi::new(PlayerMark::Naught);
        let scores = ai.move_scores(&b);
        assert_eq!(scores[0], (TTTAddr(2), 10));
        assert_eq!(ai.best_move(&b), Ok(TTTAddr(2)));
    }

    #[test]
    fn search_leaves_board_untouched() {
        let b = TTTBoard::from_str("x   o   x").unwrap();
        let before = b;
        let mut ai = ABAi::new(PlayerMark::Naught);
        ai.best_move(&b).unwrap();
        assert_eq!(b, before);
    }

    #[test]
    fn full_board_has_no_move() {
        let b = TTTBoard::from_str("xoxxoooxx").unwrap();
        let mut ai = ABAi::new(PlayerMark::Naught);
        assert_eq!(ai.best_move(&b), Err(TttError::NoMoveAvailable));
    }

    #[test]
    fn ties_go_to_the_lowest_cell() {
        // All four corners draw against a center opening.
        let b = TTTBoard::from_str("    x    ").unwrap();
        let mut ai = ABAi::new(PlayerMark::Naught);
        assert_eq!(ai.best_move(&b), Ok(TTTAddr(0)));
    }
}
