//! The cheating AI.
//!
//! After the human places a mark the AI may decide to quietly move it to the cell where it does
//! the human the least good. On its own turn it grabs any win-in-one before searching.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    core::{PlayerMark, RandomSource},
    error::{Result, TttError},
    game::tictactoe::{TTTAddr, TTTBoard, WIN_LINES},
    player::alpha_beta::ABAi,
};

/// Chance to cheat while the human has at most `EARLY_GAME_MARKS` marks down
pub const EARLY_GAME_CHANCE: f64 = 0.6;
pub const EARLY_GAME_MARKS: usize = 2;
/// Chance to cheat when the human just took the center or a corner
pub const STRONG_CELL_CHANCE: f64 = 0.7;
/// Chance to cheat when no other rule fired
pub const BASELINE_CHANCE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatDecision {
    pub triggered: bool,
    /// `None` when the cheat did not trigger, or triggered without anywhere to go
    pub relocate_to: Option<TTTAddr>,
}

/// Does the human have two in a line with the third cell still open?
pub fn has_live_threat(b: &TTTBoard, mark: PlayerMark) -> bool {
    WIN_LINES
        .iter()
        .any(|line| line.completing_cell(b, mark).is_some())
}

/// Decides whether to tamper with the human's latest move.
///
/// The rules are tried in order and the first one that fires wins. Every probabilistic rule that
/// is reached takes exactly one draw from `rng`; the threat rule takes none.
pub fn should_cheat<R: RandomSource + ?Sized>(
    b: &TTTBoard,
    just_played: TTTAddr,
    rng: &mut R,
) -> bool {
    let human = PlayerMark::HUMAN;
    if b.count(human) <= EARLY_GAME_MARKS && rng.next_unit() < EARLY_GAME_CHANCE {
        debug!("cheat: early game");
        return true;
    }
    if has_live_threat(b, human) {
        debug!("cheat: human threatens a line");
        return true;
    }
    if just_played.is_center_or_corner() && rng.next_unit() < STRONG_CELL_CHANCE {
        debug!("cheat: human took {just_played}");
        return true;
    }
    if rng.next_unit() < BASELINE_CHANCE {
        debug!("cheat: baseline");
        return true;
    }
    false
}

/// How much a human mark at `index` would help the human build open lines.
/// Lines already holding an AI mark are dead and count for nothing.
fn openness(b: &mut TTTBoard, index: usize) -> usize {
    b.put(index, PlayerMark::HUMAN);
    let view: &TTTBoard = b;
    let score = WIN_LINES
        .iter()
        .filter(|line| line.contains(index) && line.count(view, PlayerMark::AI) == 0)
        .map(|line| line.count(view, PlayerMark::HUMAN))
        .sum();
    b.take(index);
    score
}

/// The empty cell, other than `exclude`, that is least useful to the human.
/// Ties go to the lowest cell.
pub fn worst_position(b: &TTTBoard, exclude: TTTAddr) -> Result<TTTAddr> {
    let mut scratch = *b;
    let mut worst: Option<(TTTAddr, usize)> = None;
    for addr in b.valid_moves().into_iter().filter(|&a| a != exclude) {
        let score = openness(&mut scratch, addr.0);
        if worst.map_or(true, |(_, s)| score < s) {
            worst = Some((addr, score));
        }
    }
    worst
        .map(|(addr, _)| addr)
        .ok_or(TttError::NoRelocationTarget)
}

/// Stage one and two together. Expects `b` to already hold the human's mark at `human_move`.
pub fn cheat_decision<R: RandomSource + ?Sized>(
    b: &TTTBoard,
    human_move: TTTAddr,
    rng: &mut R,
) -> CheatDecision {
    if !should_cheat(b, human_move, rng) {
        return CheatDecision {
            triggered: false,
            relocate_to: None,
        };
    }
    let relocate_to = match worst_position(b, human_move) {
        Ok(addr) => Some(addr),
        Err(e) => {
            debug!("cheat aborted: {e}");
            None
        }
    };
    CheatDecision {
        triggered: true,
        relocate_to,
    }
}

/// Moves the human's mark from `from` to `to`. The number of human marks stays the same.
pub fn relocate(b: &mut TTTBoard, from: TTTAddr, to: TTTAddr) -> Result<()> {
    if b.get(from) != Some(PlayerMark::HUMAN) {
        return Err(TttError::IllegalMove {
            index: from.0,
            reason: "no human mark to move",
        });
    }
    let to = TTTAddr::new(to.0)?;
    if b.get(to).is_some() {
        return Err(TttError::IllegalMove {
            index: to.0,
            reason: "relocation target is not empty",
        });
    }
    b.clear(from)?;
    b.place_mark(to, PlayerMark::HUMAN)
}

/// The cheating AI's own move: finish any line it already has two of, otherwise search.
pub fn impossible_move(b: &TTTBoard) -> Result<TTTAddr> {
    if let Some(addr) = WIN_LINES
        .iter()
        .find_map(|line| line.completing_cell(b, PlayerMark::AI))
    {
        debug!("impossible: takes the win at {addr}");
        return Ok(addr);
    }
    ABAi::new(PlayerMark::AI).best_move(b)
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;
    use crate::core::FixedSequence;

    fn board(s: &str) -> TTTBoard {
        TTTBoard::from_str(s).unwrap()
    }

    #[test]
    fn early_game_rule_fires_below_chance() {
        let b = board("x        ");
        let mut rng = FixedSequence::new(vec![0.5]);
        assert!(should_cheat(&b, TTTAddr(0), &mut rng));
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn early_game_rule_applies_to_an_empty_board() {
        let b = TTTBoard::new();
        let mut rng = FixedSequence::new(vec![0.1]);
        assert!(should_cheat(&b, TTTAddr(4), &mut rng));
    }

    #[test]
    fn live_threat_always_cheats_without_a_draw() {
        let b = board("xx o  o x");
        let mut rng = FixedSequence::new(vec![0.99]);
        assert!(should_cheat(&b, TTTAddr(1), &mut rng));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn falls_through_every_rule() {
        // Three human marks, no open pair, an edge was just played.
        let b = board("xo ox  xo");
        let mut rng = FixedSequence::new(vec![0.5]);
        assert!(!has_live_threat(&b, PlayerMark::HUMAN));
        assert!(!should_cheat(&b, TTTAddr(7), &mut rng));
        assert_eq!(rng.draws(), 1);

        let mut rng = FixedSequence::new(vec![0.3]);
        assert!(should_cheat(&b, TTTAddr(7), &mut rng));
    }

    #[test]
    fn strong_cell_rule_then_baseline() {
        let b = board("xo ox  xo");
        // 0.65 passes the 0.7 corner roll
        let mut rng = FixedSequence::new(vec![0.65]);
        assert!(should_cheat(&b, TTTAddr(4), &mut rng));
        // 0.75 fails it and then fails the 0.4 baseline
        let mut rng = FixedSequence::new(vec![0.75]);
        assert!(!should_cheat(&b, TTTAddr(4), &mut rng));
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn worst_position_avoids_open_lines() {
        let b = board("xo       ");
        assert_eq!(worst_position(&b, TTTAddr(0)), Ok(TTTAddr(7)));
    }

    #[test]
    fn worst_position_ties_go_low() {
        // Edges lie on fewer lines than corners.
        let b = board("    x    ");
        let chosen = worst_position(&b, TTTAddr(4)).unwrap();
        assert_eq!(chosen, TTTAddr(1));
    }

    #[test]
    fn no_room_to_relocate() {
        let b = board("xoxoxoox ");
        assert_eq!(worst_position(&b, TTTAddr(8)), Err(TttError::NoRelocationTarget));
        // The open 0-4-8 diagonal forces the cheat, but there is nowhere to go.
        let mut rng = FixedSequence::new(vec![0.0]);
        let decision = cheat_decision(&b, TTTAddr(8), &mut rng);
        assert_eq!(
            decision,
            CheatDecision {
                triggered: true,
                relocate_to: None
            }
        );
    }

    #[test]
    fn decision_carries_the_target() {
        let b = board("x        ");
        let mut rng = FixedSequence::new(vec![0.0]);
        let decision = cheat_decision(&b, TTTAddr(0), &mut rng);
        assert_eq!(decision.relocate_to, Some(TTTAddr(5)));

        let mut rng = FixedSequence::new(vec![0.9]);
        let decision = cheat_decision(&b, TTTAddr(0), &mut rng);
        assert!(!decision.triggered);
        assert_eq!(decision.relocate_to, None);
    }

    #[test]
    fn relocation_keeps_the_mark_count() {
        let mut b = board("o   x    ");
        relocate(&mut b, TTTAddr(4), TTTAddr(5)).unwrap();
        assert_eq!(b.get(TTTAddr(4)), None);
        assert_eq!(b.get(TTTAddr(5)), Some(PlayerMark::HUMAN));
        assert_eq!(b.count(PlayerMark::HUMAN), 1);
        assert!(relocate(&mut b, TTTAddr(5), TTTAddr(0)).is_err());
    }

    #[test]
    fn takes_the_win_over_anything_else() {
        let b = board("oo xx    ");
        assert_eq!(impossible_move(&b), Ok(TTTAddr(2)));
        let b = board("xx oo   x");
        assert_eq!(impossible_move(&b), Ok(TTTAddr(5)));
    }

    #[test]
    fn falls_back_to_search() {
        let b = board("xx       ");
        assert_eq!(impossible_move(&b), Ok(TTTAddr(2)));
    }
}
