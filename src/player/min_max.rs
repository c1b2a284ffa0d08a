use crate::{
    core::{Player, PlayerMark},
    error::{Result, TttError},
    game::tictactoe::{TTTAddr, TTTBoard},
    player::heuristics::ttt_terminal_score,
};

/// Plain minimax without pruning. Slow, but obviously right; used to check `ABAi` against.
pub struct MinMaxAi {
    my_marker: PlayerMark,
    /// A performance counter. Compare with `ABAi::nodes_visited`
    n_nodes_visited: usize,
}

impl MinMaxAi {
    pub fn new(mark: PlayerMark) -> Self {
        Self {
            my_marker: mark,
            n_nodes_visited: 0,
        }
    }

    pub fn nodes_visited(&self) -> usize {
        self.n_nodes_visited
    }

    pub fn move_scores(&mut self, b: &TTTBoard) -> Vec<(TTTAddr, i32)> {
        let mut scratch = *b;
        let my_marker = self.my_marker;
        let mut scores = Vec::with_capacity(9);
        for addr in b.valid_moves() {
            scratch.put(addr.0, my_marker);
            let score = self.minimax(&mut scratch, 0, false);
            scratch.take(addr.0);
            scores.push((addr, score));
        }
        scores
    }

    pub fn best_move(&mut self, b: &TTTBoard) -> Result<TTTAddr> {
        let mut best: Option<(TTTAddr, i32)> = None;
        for (addr, score) in self.move_scores(b) {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((addr, score));
            }
        }
        best.map(|(addr, _)| addr).ok_or(TttError::NoMoveAvailable)
    }

    /// compute the score of a node by use of minimax
    /// Assumes I want to maximize my score, and the opponent makes moves to minimize it
    fn minimax(&mut self, node: &mut TTTBoard, depth: i32, my_move: bool) -> i32 {
        self.n_nodes_visited += 1;
        if let Some(s) = ttt_terminal_score(self.my_marker, node, depth) {
            return s;
        }
        let moves = node.valid_moves();
        let my_marker = self.my_marker; // take a copy here
        if my_move {
            let mut value = i32::MIN;
            for addr in moves {
                node.put(addr.0, my_marker);
                value = value.max(self.minimax(node, depth + 1, false));
                node.take(addr.0);
            }
            value
        } else {
            let mut value = i32::MAX;
            for addr in moves {
                node.put(addr.0, my_marker.other());
                value = value.min(self.minimax(node, depth + 1, true));
                node.take(addr.0);
            }
            value
        }
    }
}

impl Player for MinMaxAi {
    fn play(&mut self, b: &TTTBoard) -> Result<TTTAddr> {
        self.best_move(b)
    }
}
